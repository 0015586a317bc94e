//! Command handlers
//!
//! Each handler writes its human-readable output to `out` and returns
//! `anyhow::Result` so `main` can report failures uniformly.

pub mod admin;
pub mod maintain;
pub mod nav;
pub mod signup;
pub mod theme;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use ironbro_core::store::UnavailableStore;
use ironbro_core::{FileStore, KeyValueStore, SafeStore, Site, SiteConfig};

/// Loaded configuration plus the store every command shares
pub struct App {
    pub config: SiteConfig,
    store: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn load(config_path: Option<&Path>, store_path: Option<&Path>) -> Result<Self> {
        let config = SiteConfig::load_or_default(config_path)?;
        let store: Arc<dyn KeyValueStore> = match store_path
            .map(Path::to_path_buf)
            .or_else(|| config.storage_path())
        {
            Some(path) => {
                debug!("App: using store {}", path.display());
                Arc::new(FileStore::new(path))
            }
            None => {
                warn!("App: no data directory found, storage is unavailable");
                Arc::new(UnavailableStore)
            }
        };
        Ok(Self { config, store })
    }

    pub fn site(&self) -> Site {
        Site::new(self.config.clone(), self.store.clone())
    }

    pub fn store(&self) -> SafeStore {
        SafeStore::new(self.store.clone())
    }
}
