//! Session record persisted by the sign-in flow

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
    User,
}

impl Role {
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Owner => write!(f, "owner"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Signed-in user as stored under `currentUser`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub email: String,
    pub role: Role,
}

/// Loose shape accepted before validation
#[derive(Deserialize)]
struct RawSession {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl SessionRecord {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Parse a persisted record, failing closed.
    ///
    /// `null`, malformed JSON, a missing or blank email and an unrecognized
    /// role all mean "no session". A missing role is a plain user. Values are
    /// compared exactly as stored; surrounding whitespace is not stripped.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                debug!("SessionRecord: unreadable session: {}", e);
                return None;
            }
        };
        if !value.is_object() {
            return None;
        }
        let raw: RawSession = serde_json::from_value(value).ok()?;

        let email = raw.email.filter(|e| !e.trim().is_empty())?;
        let role = match raw.role.as_deref() {
            None | Some("") => Role::User,
            Some(role) => match role.parse() {
                Ok(role) => role,
                Err(()) => {
                    debug!("SessionRecord: unknown role '{}'", role);
                    return None;
                }
            },
        };
        Some(Self { email, role })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
