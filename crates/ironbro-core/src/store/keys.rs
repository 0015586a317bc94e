//! Persisted key names shared with the site's pages

/// Current theme identifier
pub const THEME: &str = "theme";
/// Milliseconds since epoch of the last local theme change
pub const THEME_TIMESTAMP: &str = "themeTimestamp";
/// Accent color override written by the settings page
pub const SITE_ACCENT: &str = "siteAccent";
/// Serialized session record (`{"email": ..., "role": ...}`)
pub const CURRENT_USER: &str = "currentUser";
/// Bare email used by the legacy admin check
pub const USER_EMAIL: &str = "userEmail";
