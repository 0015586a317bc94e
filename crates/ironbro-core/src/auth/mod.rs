//! Session records and the admin gate
//!
//! - `SessionRecord` - typed `currentUser` value with fail-closed parsing
//! - `AdminGate` - role plus allow-listed email decides admin UI visibility

mod gate;
mod session;

pub use gate::{AdminGate, DEFAULT_ADMIN_EMAIL};
pub use session::{Role, SessionRecord};
