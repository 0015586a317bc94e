//! Admin visibility gate
//!
//! Decides whether privileged UI is shown. This only hides elements; it does
//! not protect anything.

use tracing::debug;

use super::session::SessionRecord;
use crate::page::Page;
use crate::store::{keys, SafeStore};

/// Address allowed to see admin UI by default
pub const DEFAULT_ADMIN_EMAIL: &str = "krfuchs11@icloud.com";

#[derive(Debug, Clone)]
pub struct AdminGate {
    allowed: Vec<String>,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new([DEFAULT_ADMIN_EMAIL])
    }
}

impl AdminGate {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn is_allowed_email(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        !email.trim().is_empty() && self.allowed.iter().any(|a| *a == email)
    }

    /// Privileged role and allow-listed email are both required
    pub fn is_admin_visible(&self, record: Option<&SessionRecord>) -> bool {
        record.is_some_and(|r| r.role.is_privileged() && self.is_allowed_email(&r.email))
    }

    /// Check the persisted `currentUser` record
    pub fn check_store(&self, store: &SafeStore) -> bool {
        let record = store
            .get(keys::CURRENT_USER)
            .and_then(|raw| SessionRecord::parse(&raw));
        let visible = self.is_admin_visible(record.as_ref());
        debug!(
            "AdminGate: session {:?} -> visible {}",
            record.as_ref().map(|r| r.role),
            visible
        );
        visible
    }

    /// Legacy check used by older pages: bare `userEmail`, no role
    pub fn check_legacy_email(&self, store: &SafeStore) -> bool {
        store
            .get(keys::USER_EMAIL)
            .is_some_and(|email| self.is_allowed_email(&email))
    }

    /// Show or hide the admin elements that exist on `page`
    pub fn apply(&self, page: &mut Page, visible: bool) {
        let admin = &mut page.admin;
        if visible {
            if let Some(section) = admin.section.as_mut() {
                section.set_style("display", "block");
            }
            if let Some(link) = admin.link.as_mut() {
                link.set_style("display", "block");
            }
            if let Some(button) = admin.home_button.as_mut() {
                button.set_style("display", "inline-block");
            }
        } else {
            if let Some(section) = admin.section.as_mut() {
                section.set_style("display", "none");
            }
            if let Some(button) = admin.home_button.as_mut() {
                button.set_style("display", "none");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_owner_with_allowed_email_is_visible() {
        let gate = AdminGate::default();
        let record = SessionRecord::parse(r#"{"email":"KRFuchs11@icloud.com","role":"Owner"}"#);
        assert!(gate.is_admin_visible(record.as_ref()));
    }

    #[test]
    fn test_allowed_email_with_user_role_is_hidden() {
        let gate = AdminGate::default();
        let record = SessionRecord::new("krfuchs11@icloud.com", Role::User);
        assert!(!gate.is_admin_visible(Some(&record)));
    }

    #[test]
    fn test_admin_role_with_other_email_is_hidden() {
        let gate = AdminGate::default();
        let record = SessionRecord::new("someone@else.com", Role::Admin);
        assert!(!gate.is_admin_visible(Some(&record)));
    }

    #[test]
    fn test_no_session_is_hidden() {
        let gate = AdminGate::default();
        assert!(!gate.is_admin_visible(None));

        let store = SafeStore::new(Arc::new(MemoryStore::with_entries([("currentUser", "null")])));
        assert!(!gate.check_store(&store));

        let store = SafeStore::new(Arc::new(MemoryStore::with_entries([("currentUser", "{oops")])));
        assert!(!gate.check_store(&store));
    }

    #[test]
    fn test_check_store_reads_current_user() {
        let store = SafeStore::new(Arc::new(MemoryStore::with_entries([(
            "currentUser",
            r#"{"email":"krfuchs11@icloud.com","role":"admin"}"#,
        )])));
        assert!(AdminGate::default().check_store(&store));
    }

    #[test]
    fn test_legacy_email_check() {
        let gate = AdminGate::default();
        let store = SafeStore::new(Arc::new(MemoryStore::with_entries([(
            "userEmail",
            "KRFUCHS11@icloud.com",
        )])));
        assert!(gate.check_legacy_email(&store));
        assert!(!gate.check_legacy_email(&SafeStore::new(Arc::new(MemoryStore::new()))));
    }

    #[test]
    fn test_configured_allow_list() {
        let gate = AdminGate::new(["Mod@Fanclub.example", " "]);
        assert!(gate.is_allowed_email("mod@fanclub.example"));
        assert!(!gate.is_allowed_email(DEFAULT_ADMIN_EMAIL));
        assert!(!gate.is_allowed_email(""));
    }

    #[test]
    fn test_padded_session_is_hidden() {
        let gate = AdminGate::default();
        assert!(!gate.is_allowed_email("  krfuchs11@icloud.com  "));

        let padded_email =
            SessionRecord::parse(r#"{"email":"  krfuchs11@icloud.com  ","role":"admin"}"#);
        assert!(!gate.is_admin_visible(padded_email.as_ref()));

        let store = SafeStore::new(Arc::new(MemoryStore::with_entries([(
            "currentUser",
            r#"{"email":"krfuchs11@icloud.com","role":" admin "}"#,
        )])));
        assert!(!gate.check_store(&store));
    }

    #[test]
    fn test_apply_toggles_existing_elements() {
        let gate = AdminGate::default();
        let mut page = Page::with_site_layout("/index.html", [], []);
        gate.apply(&mut page, true);
        assert_eq!(page.admin.section.as_ref().unwrap().display(), Some("block"));
        assert_eq!(page.admin.link.as_ref().unwrap().display(), Some("block"));
        assert_eq!(page.admin.home_button.as_ref().unwrap().display(), Some("inline-block"));

        gate.apply(&mut page, false);
        assert_eq!(page.admin.section.as_ref().unwrap().display(), Some("none"));
        assert_eq!(page.admin.home_button.as_ref().unwrap().display(), Some("none"));

        let mut bare = Page::new("/index.html");
        gate.apply(&mut bare, true);
        assert!(bare.admin.section.is_none());
    }
}
