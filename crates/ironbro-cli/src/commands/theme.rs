//! `themes` and `theme` commands

use std::io::Write;

use anyhow::{bail, Context, Result};
use tracing::info;

use ironbro_core::{AppliedTheme, Page, ThemeCategory};

use super::App;

/// Page the CLI acts on when a change needs a tab
const SETTINGS_PAGE: &str = "/settings.html";

pub fn list(
    app: &App,
    category: Option<ThemeCategory>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let site = app.site();
    let registry = site.registry();
    let themes: Vec<_> = match category {
        Some(category) => registry.by_category(category),
        None => registry.list().iter().collect(),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&themes).context("serializing themes")?;
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    let fallback = registry.fallback().id.as_str();
    for theme in themes {
        let marker = if theme.id == fallback { " (default)" } else { "" };
        writeln!(
            out,
            "{:<16} {:<16} {:<9} {} {} {}{}",
            theme.id,
            theme.display_name,
            theme.category.as_str(),
            theme.accent,
            theme.light,
            theme.dark,
            marker
        )?;
    }
    Ok(())
}

pub fn current(app: &App, out: &mut dyn Write) -> Result<()> {
    let tab = app.site().open_tab(Page::new(SETTINGS_PAGE));
    let theme = tab.current_theme();
    let timestamp = tab.state().last_timestamp();
    writeln!(out, "{} ({})", theme.id, theme.display_name)?;
    if timestamp > 0 {
        writeln!(out, "last changed at {timestamp}")?;
    }
    Ok(())
}

pub fn set(app: &App, id: &str, out: &mut dyn Write) -> Result<()> {
    let site = app.site();
    let mut tab = site.open_tab(Page::new(SETTINGS_PAGE));
    let Some(change) = tab.select_theme(id) else {
        bail!(
            "unknown theme '{}' (known: {})",
            id,
            site.registry().ids().join(", ")
        );
    };
    if !change.persisted {
        bail!("could not save the theme to storage");
    }
    info!("Theme: persisted '{}'", id);

    for message in tab.page().notifications.iter().map(|n| n.message.as_str()) {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

pub fn css(app: &App, id: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let site = app.site();
    let theme = match id {
        Some(id) => site
            .registry()
            .get(id)
            .cloned()
            .with_context(|| format!("unknown theme '{id}'"))?,
        None => site.open_tab(Page::new(SETTINGS_PAGE)).current_theme().clone(),
    };
    write!(out, "{}", AppliedTheme::from_theme(&theme).to_css())?;
    Ok(())
}
