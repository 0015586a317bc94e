//! Page-load orchestration
//!
//! A `Site` is one origin: shared store, registry, admin gate and channel hub.
//! Every `Tab` opened on it owns its page, its own `ThemeState` and its end of
//! the theme channel, the way separate browser tabs share only storage and
//! broadcast messages.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::auth::AdminGate;
use crate::broadcast::{ChangeBroadcaster, ChannelHub};
use crate::clock::{Clock, SystemClock};
use crate::config::SiteConfig;
use crate::nav;
use crate::page::{apply_site_accent, ClickTarget, Page};
use crate::resolver::{AppliedTheme, ThemeResolver};
use crate::state::{ChangeSource, ThemeChange, ThemeState};
use crate::store::{keys, KeyValueStore, SafeStore};
use crate::theme::{Theme, ThemeRegistry};

pub struct Site {
    store: Arc<dyn KeyValueStore>,
    registry: Arc<ThemeRegistry>,
    gate: AdminGate,
    /// `None` when cross-tab sync is disabled
    hub: Option<ChannelHub>,
    clock: Arc<dyn Clock>,
    config: SiteConfig,
}

impl Site {
    pub fn new(config: SiteConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: SiteConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let hub = config
            .sync
            .enabled
            .then(|| ChannelHub::new(config.sync.capacity));
        Self {
            store,
            registry: Arc::new(config.registry()),
            gate: config.admin_gate(),
            hub,
            clock,
            config,
        }
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn store(&self) -> SafeStore {
        SafeStore::new(self.store.clone())
    }

    pub fn open_tab(&self, page: Page) -> Tab {
        let state = Arc::new(
            ThemeState::new(self.store(), self.registry.clone(), self.clock.clone()).with_default(
                &self.config.theme.default_theme,
                self.config.theme.default_selection,
            ),
        );
        let channel = self.hub.as_ref().map(|hub| hub.open(&self.config.sync.topic));
        let broadcaster = ChangeBroadcaster::new(channel, state.last_timestamp());
        let changes = state.subscribe();
        debug!(
            "Site: opened tab on {} (sync {})",
            page.path,
            broadcaster.is_connected()
        );

        Tab {
            resolver: ThemeResolver::new(state.clone()),
            state,
            broadcaster,
            changes,
            gate: self.gate.clone(),
            excluded_pages: self.config.accent.excluded_pages.clone(),
            accent: None,
            page,
        }
    }
}

/// Result of `Tab::load`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub theme: AppliedTheme,
    pub active_links: usize,
    pub admin_visible: bool,
    pub accent_applied: bool,
}

pub struct Tab {
    state: Arc<ThemeState>,
    resolver: ThemeResolver,
    broadcaster: ChangeBroadcaster,
    changes: broadcast::Receiver<ThemeChange>,
    gate: AdminGate,
    excluded_pages: Vec<String>,
    /// Site accent this tab last applied
    accent: Option<String>,
    page: Page,
}

impl Tab {
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    pub fn current_theme(&self) -> &Theme {
        self.state.current()
    }

    /// Theme, navigation, admin gate, then site accent
    pub fn load(&mut self) -> LoadReport {
        let theme = self.resolver.resolve_and_apply(&mut self.page);

        let current = self.page.current_page();
        let active_links = nav::highlight_active(&mut self.page.nav_links, &current);

        let admin_visible = self.gate.check_store(self.state.store());
        self.gate.apply(&mut self.page, admin_visible);

        let accent_applied = match self.state.store().get(keys::SITE_ACCENT) {
            Some(accent) => self.apply_accent(&accent),
            None => false,
        };

        info!(
            "Tab: loaded {} with theme '{}' ({} active link(s), admin {})",
            self.page.path, theme.id, active_links, admin_visible
        );
        LoadReport {
            theme,
            active_links,
            admin_visible,
            accent_applied,
        }
    }

    /// User picked a theme; `None` when the id is not registered
    pub fn select_theme(&mut self, id: &str) -> Option<ThemeChange> {
        let change = self.state.set_local(id);
        self.process_changes();
        change
    }

    /// Click on the `index`th `.theme-option` button
    pub fn click_theme_option(&mut self, index: usize) -> bool {
        let Some(theme) = self
            .page
            .theme_options
            .get(index)
            .and_then(|option| option.theme.clone())
        else {
            debug!("Tab: no theme option at {}", index);
            return false;
        };
        self.select_theme(&theme).is_some()
    }

    /// Apply theme changes posted by other tabs and pick up a site accent
    /// stored by another tab; returns how many theme changes were applied
    pub fn receive_remote(&mut self) -> usize {
        let mut applied = 0;
        for change in self.broadcaster.poll() {
            if self
                .state
                .apply_remote(&change.theme, change.timestamp)
                .is_some()
            {
                applied += 1;
            }
        }
        self.process_changes();
        self.refresh_site_accent();
        applied
    }

    /// Click routed through the page controls
    pub fn click(&mut self, target: ClickTarget) {
        self.page.handle_click(target);
    }

    /// Advance notification timers
    pub fn tick(&mut self) {
        let now = self.state.clock().now_millis();
        self.page.tick(now);
    }

    /// Persist a site accent and restyle the sidebar
    pub fn set_site_accent(&mut self, accent: &str) -> bool {
        let accent = accent.trim();
        if accent.is_empty() {
            return false;
        }
        self.state.store().set(keys::SITE_ACCENT, accent);
        self.apply_accent(accent)
    }

    fn apply_accent(&mut self, accent: &str) -> bool {
        self.accent = Some(accent.trim().to_string());
        apply_site_accent(&mut self.page, accent, self.excluded_pages.as_slice())
    }

    /// Re-apply the stored site accent when another tab changed it
    fn refresh_site_accent(&mut self) {
        let Some(stored) = self
            .state
            .store()
            .get(keys::SITE_ACCENT)
            .filter(|a| !a.trim().is_empty())
        else {
            return;
        };
        if self.accent.as_deref() == Some(stored.trim()) {
            return;
        }
        debug!("Tab: site accent changed to '{}'", stored.trim());
        self.apply_accent(&stored);
    }

    /// Drain this tab's state subscription into the page and the channel
    fn process_changes(&mut self) {
        loop {
            let change = match self.changes.try_recv() {
                Ok(change) => change,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Tab: missed {} theme change(s)", skipped);
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            };

            self.resolver.apply_id(&change.theme, &mut self.page);
            if change.source == ChangeSource::Local {
                self.broadcaster.broadcast(&change.theme, change.timestamp);
                let now = self.state.clock().now_millis();
                self.page.show_notification(
                    format!("Theme set to {}", Theme::short_label(&change.theme)),
                    now,
                );
            }
        }
    }
}
