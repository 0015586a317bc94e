//! Theme registry: identifier lookup with a guaranteed fallback

use std::collections::HashMap;

use tracing::{debug, warn};

use super::definitions::builtin_themes;
use super::{Theme, ThemeCategory, DEFAULT_THEME};

/// Registry of all known themes
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
    index: HashMap<String, usize>,
    fallback: usize,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    /// Built-in themes with `brosquad-blue` as fallback
    pub fn new() -> Self {
        Self::with_custom(Vec::new(), DEFAULT_THEME)
    }

    /// Built-in themes plus custom ones; a custom theme replaces a built-in with the same id
    pub fn with_custom(custom: Vec<Theme>, fallback: &str) -> Self {
        let mut themes = builtin_themes();
        let mut index: HashMap<String, usize> = themes
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        for mut theme in custom {
            if theme.id.is_empty() {
                warn!("ThemeRegistry: skipping custom theme without an id");
                continue;
            }
            if theme.display_name.is_empty() {
                theme.display_name = Theme::short_label(&theme.id);
            }
            match index.get(&theme.id) {
                Some(&i) => {
                    debug!("ThemeRegistry: custom theme '{}' replaces built-in", theme.id);
                    themes[i] = theme;
                }
                None => {
                    index.insert(theme.id.clone(), themes.len());
                    themes.push(theme);
                }
            }
        }

        let fallback = match index.get(fallback) {
            Some(&i) => i,
            None => {
                warn!(
                    "ThemeRegistry: fallback '{}' is not registered, using '{}'",
                    fallback, DEFAULT_THEME
                );
                index.get(DEFAULT_THEME).copied().unwrap_or(0)
            }
        };

        Self {
            themes,
            index,
            fallback,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.index.get(id).map(|&i| &self.themes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up an identifier, falling back for absent or unknown ids
    pub fn resolve(&self, id: Option<&str>) -> &Theme {
        id.and_then(|id| self.get(id)).unwrap_or_else(|| self.fallback())
    }

    pub fn fallback(&self) -> &Theme {
        &self.themes[self.fallback]
    }

    /// Identifiers in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn list(&self) -> &[Theme] {
        &self.themes
    }

    pub fn by_category(&self, category: ThemeCategory) -> Vec<&Theme> {
        self.themes
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
