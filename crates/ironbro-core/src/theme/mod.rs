//! Theme system for the site
//!
//! A theme is a named accent triple (accent, light, dark) applied to the page
//! through CSS custom properties.

mod color;
pub mod definitions;
mod registry;

use serde::{Deserialize, Serialize};

pub use color::{Color, ColorParseError};
pub use registry::ThemeRegistry;

/// Theme applied when nothing valid is persisted
pub const DEFAULT_THEME: &str = "brosquad-blue";

/// Where a theme is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    /// Available on every page
    #[default]
    Standard,
    /// Brosquad members' exclusive themes
    Brosquad,
}

impl ThemeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeCategory::Standard => "standard",
            ThemeCategory::Brosquad => "brosquad",
        }
    }
}

/// A complete theme definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: ThemeCategory,
    pub accent: Color,
    pub light: Color,
    pub dark: Color,
}

impl Theme {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: ThemeCategory,
        accent: Color,
        light: Color,
        dark: Color,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            category,
            accent,
            light,
            dark,
        }
    }

    /// Name used in notifications: "brosquad-" dropped, first letter capitalized
    pub fn short_label(id: &str) -> String {
        let bare = id.strip_prefix("brosquad-").unwrap_or(id);
        let mut chars = bare.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
