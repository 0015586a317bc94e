//! Cross-tab message shapes

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message posted on the theme channel
///
/// Serializes as `{"type": "THEME_CHANGE", "theme": ..., "timestamp": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelMessage {
    ThemeChange { theme: String, timestamp: i64 },
}

impl ChannelMessage {
    pub fn theme_change(theme: impl Into<String>, timestamp: i64) -> Self {
        ChannelMessage::ThemeChange {
            theme: theme.into(),
            timestamp,
        }
    }

    /// Parse a raw message; anything malformed or of another type is dropped
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!("ChannelMessage: ignoring malformed message: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        // A two-field enum variant always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}
