//! Theme resolver
//!
//! Turns the current selection into CSS custom properties, the `data-theme`
//! attribute, the body theme class and the `theme-style` stylesheet.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use crate::page::Page;
use crate::state::ThemeState;
use crate::theme::Theme;

/// Id of the generated `<style>` block
pub const THEME_STYLE_ID: &str = "theme-style";
const BODY_CLASS_PREFIX: &str = "theme-";

/// Everything a theme writes into a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTheme {
    pub id: String,
    /// CSS custom properties in name order
    pub variables: BTreeMap<String, String>,
    pub stylesheet: String,
}

impl AppliedTheme {
    pub fn from_theme(theme: &Theme) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("--accent".to_string(), theme.accent.to_hex());
        variables.insert("--accent-light".to_string(), theme.light.to_hex());
        variables.insert("--accent-dark".to_string(), theme.dark.to_hex());
        variables.insert("--accent-rgb".to_string(), theme.accent.rgb_triplet());

        let stylesheet = format!(
            "a:hover, a:focus {{ color: {}; }}\n::selection {{ background: {}; color: #fff; }}\n",
            theme.light.to_hex(),
            theme.accent.to_hex()
        );

        Self {
            id: theme.id.clone(),
            variables,
            stylesheet,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Standalone CSS for the theme
    pub fn to_css(&self) -> String {
        let mut css = format!(":root[data-theme=\"{}\"] {{\n", self.id);
        for (name, value) in &self.variables {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        css.push_str(&self.stylesheet);
        css
    }

    /// Write variables, attribute, body class and stylesheet into `page`
    pub fn apply_to(&self, page: &mut Page) {
        for (name, value) in &self.variables {
            page.root.set_style(name, value);
        }
        page.root.set_attribute("data-theme", &self.id);

        page.body
            .classes
            .retain(|class| !class.starts_with(BODY_CLASS_PREFIX));
        page.body.add_class(&format!("{BODY_CLASS_PREFIX}{}", self.id));

        page.set_stylesheet(THEME_STYLE_ID, self.stylesheet.clone());
        page.root.remove_class("preload");
    }
}

pub struct ThemeResolver {
    state: Arc<ThemeState>,
}

impl ThemeResolver {
    pub fn new(state: Arc<ThemeState>) -> Self {
        Self { state }
    }

    /// Current theme as it would be applied, without touching storage
    pub fn resolve(&self) -> AppliedTheme {
        AppliedTheme::from_theme(self.state.current())
    }

    /// Resolve the current theme and apply it to `page`.
    ///
    /// A default selection is persisted so the next load resolves the same way.
    pub fn resolve_and_apply(&self, page: &mut Page) -> AppliedTheme {
        let id = self.state.ensure_persisted();
        let applied = AppliedTheme::from_theme(self.state.registry().resolve(Some(&id)));
        self.apply(&applied, page);
        debug!("ThemeResolver: applied '{}' to {}", applied.id, page.path);
        applied
    }

    /// Apply a specific theme id (falls back for unknown ids)
    pub fn apply_id(&self, id: &str, page: &mut Page) -> AppliedTheme {
        let applied = AppliedTheme::from_theme(self.state.registry().resolve(Some(id)));
        self.apply(&applied, page);
        applied
    }

    fn apply(&self, applied: &AppliedTheme, page: &mut Page) {
        applied.apply_to(page);
        page.start_transition(self.state.clock().now_millis());
    }
}
