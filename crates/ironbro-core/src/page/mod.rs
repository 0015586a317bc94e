//! Page model
//!
//! The slice of the DOM the site's scripts touch: the root and body elements,
//! the sidebar, the settings panel, nav links, theme buttons, admin elements,
//! notifications and named `<style>` blocks. Every optional element may be
//! missing; operations on a missing element do nothing.

mod accent;
mod controls;
mod notification;

use std::collections::{BTreeMap, BTreeSet};

pub use accent::{apply_site_accent, AccentElement, DEFAULT_EXCLUDED_PAGES};
pub use controls::{ClickTarget, MOBILE_BREAKPOINT};
pub use notification::{Notification, NotificationPhase};

/// Root class present while theme colors animate
pub const TRANSITION_CLASS: &str = "theme-transition";
const TRANSITION_MS: i64 = 300;

/// Attributes, inline styles and classes of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub classes: BTreeSet<String>,
    pub style: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Toggle a class; returns whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_string(), value.to_string());
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Inline `display` value
    pub fn display(&self) -> Option<&str> {
        self.style("display")
    }
}

/// `.nav-link` anchor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavLink {
    pub href: Option<String>,
    pub element: Element,
}

impl NavLink {
    pub fn new(href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            element: Element::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.element.has_class("active")
    }
}

/// `.theme-option[data-theme]` button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOption {
    pub theme: Option<String>,
    pub element: Element,
}

impl ThemeOption {
    pub fn new(theme: &str) -> Self {
        Self {
            theme: Some(theme.to_string()),
            element: Element::new().with_attribute("data-theme", theme),
        }
    }
}

/// `#adminSection`, `#adminLink` and `#adminBtnHome`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminElements {
    pub section: Option<Element>,
    pub link: Option<Element>,
    pub home_button: Option<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// `location.pathname`
    pub path: String,
    pub viewport_width: u32,
    /// `document.documentElement`
    pub root: Element,
    pub body: Element,
    pub sidebar: Option<Element>,
    /// `<img>` elements inside the sidebar
    pub sidebar_images: Vec<Element>,
    /// Candidates for site accent recoloring
    pub accent_elements: Vec<AccentElement>,
    pub settings_panel: Option<Element>,
    pub settings_toggle: Option<Element>,
    pub menu_toggle: Option<Element>,
    pub nav_links: Vec<NavLink>,
    pub theme_options: Vec<ThemeOption>,
    pub admin: AdminElements,
    pub notifications: Vec<Notification>,
    /// `<style id=...>` contents keyed by id
    pub stylesheets: BTreeMap<String, String>,
    /// When the running theme transition started
    pub transition_started: Option<i64>,
}

impl Page {
    /// Bare page at `path` with a desktop-sized viewport
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            viewport_width: 1280,
            root: Element::new(),
            body: Element::new(),
            sidebar: None,
            sidebar_images: Vec::new(),
            accent_elements: Vec::new(),
            settings_panel: None,
            settings_toggle: None,
            menu_toggle: None,
            nav_links: Vec::new(),
            theme_options: Vec::new(),
            admin: AdminElements::default(),
            notifications: Vec::new(),
            stylesheets: BTreeMap::new(),
            transition_started: None,
        }
    }

    /// Page with the layout shared by the site's pages: sidebar with nav links,
    /// settings panel with one button per theme, and the admin elements
    pub fn with_site_layout<'a>(
        path: &str,
        links: impl IntoIterator<Item = &'a str>,
        themes: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut page = Self::new(path);
        page.sidebar = Some(Element::new());
        page.settings_panel = Some(Element::new());
        page.settings_toggle = Some(Element::new());
        page.menu_toggle = Some(Element::new());
        page.nav_links = links.into_iter().map(NavLink::new).collect();
        page.theme_options = themes.into_iter().map(ThemeOption::new).collect();
        page.admin = AdminElements {
            section: Some(Element::new()),
            link: Some(Element::new()),
            home_button: Some(Element::new()),
        };
        page
    }

    pub fn with_viewport(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Last path segment, or `index.html` for the site root
    pub fn current_page(&self) -> String {
        crate::nav::current_page(&self.path)
    }

    pub fn stylesheet(&self, id: &str) -> Option<&str> {
        self.stylesheets.get(id).map(String::as_str)
    }

    pub fn set_stylesheet(&mut self, id: &str, css: String) {
        self.stylesheets.insert(id.to_string(), css);
    }

    /// Add the transition class; it is dropped by `tick` once the animation ends
    pub fn start_transition(&mut self, now: i64) {
        self.root.add_class(TRANSITION_CLASS);
        self.transition_started = Some(now);
    }

    /// Advance notification and transition timers
    pub fn tick(&mut self, now: i64) {
        self.tick_notifications(now);
        if self
            .transition_started
            .is_some_and(|started| now - started >= TRANSITION_MS)
        {
            self.root.remove_class(TRANSITION_CLASS);
            self.transition_started = None;
        }
    }

    pub fn active_links(&self) -> Vec<&str> {
        self.nav_links
            .iter()
            .filter(|l| l.is_active())
            .filter_map(|l| l.href.as_deref())
            .collect()
    }
}
