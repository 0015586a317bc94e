//! Site configuration
//!
//! Loaded from `<config dir>/ironbro/config.toml`. Every field has a default
//! matching the live site, so a missing file is not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::{AdminGate, DEFAULT_ADMIN_EMAIL};
use crate::broadcast::THEME_CHANNEL;
use crate::page::DEFAULT_EXCLUDED_PAGES;
use crate::state::DefaultSelection;
use crate::store::FileStore;
use crate::theme::{Theme, ThemeRegistry, DEFAULT_THEME};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub admin: AdminConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub accent: AccentConfig,
    pub signup: SignupConfig,
    pub maintenance: MaintenanceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme used when nothing valid is persisted (and as lookup fallback)
    pub default_theme: String,
    pub default_selection: DefaultSelection,
    /// Extra themes; an id matching a built-in replaces it
    pub custom: Vec<Theme>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            default_selection: DefaultSelection::Fixed,
            custom: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub emails: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            emails: vec![DEFAULT_ADMIN_EMAIL.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file; defaults to `<data dir>/ironbro/storage.json`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub enabled: bool,
    pub topic: String,
    pub capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            topic: THEME_CHANNEL.to_string(),
            capacity: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentConfig {
    pub excluded_pages: Vec<String>,
}

impl Default for AccentConfig {
    fn default() -> Self {
        Self {
            excluded_pages: DEFAULT_EXCLUDED_PAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    pub endpoint: String,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/signup".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Script tag injected into every page
    pub script_path: String,
    /// `data-theme` added to `<html>` when missing
    pub default_theme_attribute: String,
    pub html_files: Vec<String>,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            script_path: "js/theme-manager.js".to_string(),
            default_theme_attribute: "red".to_string(),
            html_files: [
                "index.html",
                "brosquad-new.html",
                "videos.html",
                "fan-mail.html",
                "join.html",
                "signup.html",
                "members-only.html",
                "admin.html",
                "404.html",
                "donate.html",
                "cube-wars.html",
                "space-blaster.html",
                "settings.html",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        }
    }
}

impl SiteConfig {
    /// `<config dir>/ironbro/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ironbro").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!("SiteConfig: loaded {}", path.display());
        Ok(config)
    }

    /// Load `path` (or the default location); a missing file yields defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };
        if !path.exists() {
            debug!("SiteConfig: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn registry(&self) -> ThemeRegistry {
        ThemeRegistry::with_custom(self.theme.custom.clone(), &self.theme.default_theme)
    }

    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(&self.admin.emails)
    }

    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(FileStore::default_path)
    }
}
