//! Sidebar and settings panel controls

use tracing::debug;

use super::Page;

/// Viewports at or below this width use the collapsible mobile sidebar
pub const MOBILE_BREAKPOINT: u32 = 860;

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SettingsPanel,
    SettingsToggle,
    Sidebar,
    MenuToggle,
    NavLink,
    Elsewhere,
}

impl Page {
    pub fn is_mobile(&self) -> bool {
        self.viewport_width <= MOBILE_BREAKPOINT
    }

    pub fn toggle_sidebar(&mut self) {
        if let Some(sidebar) = self.sidebar.as_mut() {
            let open = sidebar.toggle_class("active");
            debug!("Page: sidebar toggled (open: {})", open);
        }
    }

    pub fn toggle_settings(&mut self) {
        if let Some(panel) = self.settings_panel.as_mut() {
            let open = panel.toggle_class("active");
            debug!("Page: settings panel toggled (open: {})", open);
        }
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar.as_ref().is_some_and(|s| s.has_class("active"))
    }

    pub fn settings_open(&self) -> bool {
        self.settings_panel
            .as_ref()
            .is_some_and(|p| p.has_class("active"))
    }

    /// Document-level click handling: outside clicks close open panels
    pub fn handle_click(&mut self, target: ClickTarget) {
        let on_settings = matches!(
            target,
            ClickTarget::SettingsPanel | ClickTarget::SettingsToggle
        );
        if !on_settings && self.settings_toggle.is_some() {
            if let Some(panel) = self.settings_panel.as_mut() {
                panel.remove_class("active");
            }
        }

        let on_sidebar = matches!(
            target,
            ClickTarget::Sidebar | ClickTarget::MenuToggle | ClickTarget::NavLink
        );
        if !on_sidebar && self.is_mobile() && self.menu_toggle.is_some() {
            if let Some(sidebar) = self.sidebar.as_mut() {
                sidebar.remove_class("active");
            }
        }

        // Following a nav link closes the mobile menu
        if target == ClickTarget::NavLink && self.is_mobile() {
            if let Some(sidebar) = self.sidebar.as_mut() {
                sidebar.remove_class("active");
            }
        }
    }
}
