//! `signup` command

use std::io::Write;

use anyhow::Result;

use ironbro_core::signup::SignupClient;

use super::App;

pub async fn run(
    app: &App,
    email: &str,
    password: &str,
    endpoint: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let endpoint = endpoint.unwrap_or(&app.config.signup.endpoint);
    let client = SignupClient::new(endpoint)?;
    let response = client.signup(email, password).await?;
    if response.message.is_empty() {
        writeln!(out, "signup sent to {}", client.endpoint())?;
    } else {
        writeln!(out, "{}", response.message)?;
    }
    Ok(())
}
