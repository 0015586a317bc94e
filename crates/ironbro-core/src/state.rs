//! Theme configuration state
//!
//! Single owner of the "current theme". Pages, notifications and admin styling
//! subscribe here instead of reading the persisted store themselves.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::store::{keys, SafeStore};
use crate::theme::{Theme, ThemeRegistry};

const CHANGE_CAPACITY: usize = 16;

/// How the theme is picked when nothing valid is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultSelection {
    /// Always the configured default theme
    #[default]
    Fixed,
    /// Uniformly random over the registry
    Random,
}

/// Who caused a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeSource {
    /// User action in this tab
    Local,
    /// Message from another tab
    Remote,
}

/// Published to subscribers after every accepted change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeChange {
    pub theme: String,
    pub timestamp: i64,
    pub source: ChangeSource,
    /// Whether both keys reached storage; the in-memory selection holds either way
    pub persisted: bool,
}

pub struct ThemeState {
    store: SafeStore,
    registry: Arc<ThemeRegistry>,
    clock: Arc<dyn Clock>,
    default_theme: String,
    selection: DefaultSelection,
    changes: broadcast::Sender<ThemeChange>,
    /// Selection used when storage has nothing (or cannot be reached)
    memo: Mutex<Option<String>>,
    last_issued: Mutex<i64>,
}

impl ThemeState {
    pub fn new(store: SafeStore, registry: Arc<ThemeRegistry>, clock: Arc<dyn Clock>) -> Self {
        let default_theme = registry.fallback().id.clone();
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            store,
            registry,
            clock,
            default_theme,
            selection: DefaultSelection::Fixed,
            changes,
            memo: Mutex::new(None),
            last_issued: Mutex::new(0),
        }
    }

    /// Override the default theme and how it is selected
    pub fn with_default(mut self, default_theme: &str, selection: DefaultSelection) -> Self {
        if self.registry.contains(default_theme) {
            self.default_theme = default_theme.to_string();
        } else {
            warn!(
                "ThemeState: default theme '{}' is not registered, keeping '{}'",
                default_theme, self.default_theme
            );
        }
        self.selection = selection;
        self
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &SafeStore {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Persisted identifier, if it names a registered theme
    pub fn persisted_id(&self) -> Option<String> {
        let id = self.store.get(keys::THEME)?;
        if self.registry.contains(&id) {
            Some(id)
        } else {
            debug!("ThemeState: ignoring unknown persisted theme '{}'", id);
            None
        }
    }

    pub fn current_id(&self) -> String {
        self.persisted_id().unwrap_or_else(|| self.default_id())
    }

    pub fn current(&self) -> &Theme {
        let id = self.current_id();
        self.registry.resolve(Some(&id))
    }

    /// Current identifier, written back to storage when it was not persisted
    pub fn ensure_persisted(&self) -> String {
        if let Some(id) = self.persisted_id() {
            return id;
        }
        let id = self.default_id();
        if self.store.set(keys::THEME, &id) {
            debug!("ThemeState: persisted default theme '{}'", id);
        }
        id
    }

    /// Timestamp of the last persisted change; 0 when absent or malformed
    pub fn last_timestamp(&self) -> i64 {
        self.store
            .get(keys::THEME_TIMESTAMP)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChange> {
        self.changes.subscribe()
    }

    /// User-driven change; unknown ids are rejected
    pub fn set_local(&self, id: &str) -> Option<ThemeChange> {
        if !self.registry.contains(id) {
            warn!("ThemeState: ignoring change to unknown theme '{}'", id);
            return None;
        }
        let timestamp = self.next_timestamp();
        self.commit(id, timestamp, ChangeSource::Local)
    }

    /// Change received from another tab, keeping the sender's timestamp
    pub fn apply_remote(&self, id: &str, timestamp: i64) -> Option<ThemeChange> {
        if !self.registry.contains(id) {
            warn!("ThemeState: ignoring remote change to unknown theme '{}'", id);
            return None;
        }
        {
            let mut last = self.last_issued.lock();
            *last = (*last).max(timestamp);
        }
        self.commit(id, timestamp, ChangeSource::Remote)
    }

    fn commit(&self, id: &str, timestamp: i64, source: ChangeSource) -> Option<ThemeChange> {
        let persisted = self.store.set(keys::THEME, id)
            & self.store.set(keys::THEME_TIMESTAMP, &timestamp.to_string());
        if !persisted {
            warn!("ThemeState: '{}' is kept in memory only", id);
        }
        *self.memo.lock() = Some(id.to_string());

        let change = ThemeChange {
            theme: id.to_string(),
            timestamp,
            source,
            persisted,
        };
        info!("ThemeState: theme set to '{}' ({:?})", id, source);
        // No subscribers is fine
        let _ = self.changes.send(change.clone());
        Some(change)
    }

    /// Strictly increasing local timestamps, even within one millisecond
    fn next_timestamp(&self) -> i64 {
        let mut last = self.last_issued.lock();
        let floor = (*last).max(self.last_timestamp());
        let timestamp = self.clock.now_millis().max(floor + 1);
        *last = timestamp;
        timestamp
    }

    fn default_id(&self) -> String {
        let mut memo = self.memo.lock();
        if let Some(id) = memo.as_ref() {
            return id.clone();
        }
        let id = match self.selection {
            DefaultSelection::Fixed => self.default_theme.clone(),
            DefaultSelection::Random => self
                .registry
                .list()
                .choose(&mut rand::thread_rng())
                .map(|t| t.id.clone())
                .unwrap_or_else(|| self.default_theme.clone()),
        };
        debug!("ThemeState: default selection '{}'", id);
        *memo = Some(id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::{KeyValueStore, MemoryStore, UnavailableStore};

    fn state_with(store: Arc<dyn KeyValueStore>, clock: Arc<ManualClock>) -> ThemeState {
        ThemeState::new(
            SafeStore::new(store),
            Arc::new(ThemeRegistry::new()),
            clock,
        )
    }

    #[test]
    fn test_current_falls_back_to_default() {
        let state = state_with(Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
        assert_eq!(state.current_id(), "brosquad-blue");
        assert_eq!(state.current().accent.to_hex(), "#00aaff");
    }

    #[test]
    fn test_unknown_persisted_theme_is_ignored() {
        let store = Arc::new(MemoryStore::with_entries([("theme", "brosquad-gold")]));
        let state = state_with(store, Arc::new(ManualClock::new(0)));
        assert_eq!(state.persisted_id(), None);
        assert_eq!(state.current_id(), "brosquad-blue");
    }

    #[test]
    fn test_set_local_persists_and_notifies() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), Arc::new(ManualClock::new(1_000)));
        let mut rx = state.subscribe();

        let change = state.set_local("green").unwrap();
        assert_eq!(change.timestamp, 1_000);
        assert_eq!(change.source, ChangeSource::Local);
        assert!(change.persisted);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("green"));
        assert_eq!(store.get("themeTimestamp").unwrap().as_deref(), Some("1000"));
        assert_eq!(rx.try_recv().unwrap(), change);
    }

    #[test]
    fn test_set_local_rejects_unknown() {
        let state = state_with(Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
        let mut rx = state.subscribe();
        assert!(state.set_local("orange").is_none());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_local_timestamps_strictly_increase() {
        let clock = Arc::new(ManualClock::new(5_000));
        let state = state_with(Arc::new(MemoryStore::new()), clock.clone());
        let first = state.set_local("red").unwrap();
        let second = state.set_local("blue").unwrap();
        assert!(second.timestamp > first.timestamp);

        // Clock going backwards still yields a newer stamp
        clock.set(10);
        let third = state.set_local("green").unwrap();
        assert!(third.timestamp > second.timestamp);
    }

    #[test]
    fn test_remote_keeps_sender_timestamp() {
        let state = state_with(Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(100)));
        let change = state.apply_remote("brosquad-neon", 9_999).unwrap();
        assert_eq!(change.source, ChangeSource::Remote);
        assert_eq!(state.last_timestamp(), 9_999);
        assert!(state.set_local("red").unwrap().timestamp > 9_999);
    }

    #[test]
    fn test_malformed_timestamp_reads_as_zero() {
        let store = Arc::new(MemoryStore::with_entries([("themeTimestamp", "soon")]));
        let state = state_with(store, Arc::new(ManualClock::new(0)));
        assert_eq!(state.last_timestamp(), 0);
    }

    #[test]
    fn test_unavailable_storage_uses_memory() {
        let state = state_with(Arc::new(UnavailableStore), Arc::new(ManualClock::new(0)));
        assert_eq!(state.ensure_persisted(), "brosquad-blue");
        let change = state.set_local("yellow").unwrap();
        assert!(!change.persisted);
        assert_eq!(state.current_id(), "yellow");
    }

    #[test]
    fn test_random_default_is_stable_and_persisted() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), Arc::new(ManualClock::new(0)))
            .with_default("red", DefaultSelection::Random);
        let first = state.ensure_persisted();
        assert!(state.registry().contains(&first));
        assert_eq!(state.current_id(), first);
        assert_eq!(store.get("theme").unwrap(), Some(first));
    }

    #[test]
    fn test_with_default_rejects_unknown() {
        let state = state_with(Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)))
            .with_default("orange", DefaultSelection::Fixed);
        assert_eq!(state.current_id(), "brosquad-blue");

        let state = state_with(Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)))
            .with_default("red", DefaultSelection::Fixed);
        assert_eq!(state.current_id(), "red");
    }
}
