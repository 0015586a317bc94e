//! Core library for the ironbro26 fan club site
//!
//! - Theme registry and resolver (accent color triples, CSS variables)
//! - Configuration state with subscribers and cross-tab sync
//! - Navigation highlighting, admin gate and page controls
//! - Signup client and site configuration

pub mod auth;
pub mod broadcast;
pub mod clock;
pub mod config;
pub mod nav;
pub mod page;
pub mod resolver;
pub mod signup;
pub mod state;
pub mod store;
pub mod tab;
pub mod theme;

pub use auth::{AdminGate, Role, SessionRecord};
pub use broadcast::{ChangeBroadcaster, ChannelHub, ChannelMessage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SiteConfig;
pub use page::Page;
pub use resolver::{AppliedTheme, ThemeResolver};
pub use state::{ChangeSource, ThemeChange, ThemeState};
pub use store::{FileStore, KeyValueStore, MemoryStore, SafeStore, StoreError};
pub use tab::{LoadReport, Site, Tab};
pub use theme::{Color, Theme, ThemeCategory, ThemeRegistry};
