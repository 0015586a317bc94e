//! Signup client
//!
//! Posts `{email, password}` to the site's signup endpoint and returns the
//! endpoint's `message`. The endpoint itself lives elsewhere.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: String,
}

pub struct SignupClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl SignupClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).with_context(|| format!("invalid signup endpoint '{endpoint}'"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse> {
        let email = email.trim();
        if email.is_empty() {
            bail!("email is required");
        }
        if password.is_empty() {
            bail!("password is required");
        }

        debug!("Signup: posting to {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SignupRequest { email, password })
            .send()
            .await
            .context("sending signup request")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Signup: endpoint answered {}", status);
        }

        response
            .json::<SignupResponse>()
            .await
            .context("parsing signup response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Serve one request with `status` and `body`, handing back the request body
    fn serve_once(status: u16, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let mut received = String::new();
            request.as_reader().read_to_string(&mut received).unwrap();
            let header =
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .unwrap();
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            request.respond(response).unwrap();
            received
        });
        (format!("http://{addr}/api/signup"), handle)
    }

    #[tokio::test]
    async fn test_signup_posts_credentials() {
        let (url, server) = serve_once(200, r#"{"message":"Welcome to the Brosquad!"}"#);
        let client = SignupClient::new(&url).unwrap();

        let response = client.signup(" fan@example.com ", "hunter2").await.unwrap();
        assert_eq!(response.message, "Welcome to the Brosquad!");

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["email"], "fan@example.com");
        assert_eq!(sent["password"], "hunter2");
    }

    #[tokio::test]
    async fn test_error_status_still_returns_message() {
        let (url, server) = serve_once(409, r#"{"message":"Email already registered"}"#);
        let client = SignupClient::new(&url).unwrap();
        let response = client.signup("fan@example.com", "pw").await.unwrap();
        assert_eq!(response.message, "Email already registered");
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_missing_message_is_empty() {
        let (url, server) = serve_once(200, "{}");
        let client = SignupClient::new(&url).unwrap();
        assert_eq!(client.signup("fan@example.com", "pw").await.unwrap(), SignupResponse::default());
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_rejects_blank_credentials_without_request() {
        let client = SignupClient::new("http://127.0.0.1:9/api/signup").unwrap();
        assert!(client.signup("  ", "pw").await.is_err());
        assert!(client.signup("fan@example.com", "").await.is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(SignupClient::new("not a url").is_err());
    }
}
