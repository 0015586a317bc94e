//! `admin` and `session` commands

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use tracing::info;

use ironbro_core::store::keys;
use ironbro_core::{Role, SessionRecord};

use super::App;

/// Report whether the admin UI would be shown for the stored session
pub fn check(app: &App, legacy: bool, out: &mut dyn Write) -> Result<()> {
    let gate = app.config.admin_gate();
    let store = app.store();
    let visible = if legacy {
        gate.check_legacy_email(&store)
    } else {
        gate.check_store(&store)
    };

    match store.get(keys::CURRENT_USER).and_then(|raw| SessionRecord::parse(&raw)) {
        Some(record) => writeln!(out, "session: {} ({})", record.email, record.role)?,
        None => writeln!(out, "session: none")?,
    }
    writeln!(
        out,
        "admin UI: {}",
        if visible { "visible" } else { "hidden" }
    )?;
    Ok(())
}

pub fn set_session(app: &App, email: &str, role: &str, out: &mut dyn Write) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        bail!("email is required");
    }
    let role: Role = role
        .parse()
        .map_err(|()| anyhow!("unknown role '{role}' (expected admin, owner or user)"))?;

    let record = SessionRecord::new(email, role);
    let store = app.store();
    if !(store.set(keys::CURRENT_USER, &record.to_json()) && store.set(keys::USER_EMAIL, email)) {
        bail!("could not write the session to storage");
    }
    info!("Session: stored {} as {}", email, role);
    writeln!(out, "signed in as {email} ({role})")?;
    Ok(())
}

pub fn clear_session(app: &App, out: &mut dyn Write) -> Result<()> {
    let store = app.store();
    let cleared = store.remove(keys::CURRENT_USER) & store.remove(keys::USER_EMAIL);
    if !cleared {
        bail!("could not clear the session from storage");
    }
    writeln!(out, "signed out")?;
    Ok(())
}
