//! `nav` command: which links a page would highlight

use std::io::Write;

use anyhow::Result;

use ironbro_core::nav::{highlight_active, matching_rule};
use ironbro_core::Page;

pub fn run(path: &str, links: &[String], out: &mut dyn Write) -> Result<()> {
    let mut page = Page::with_site_layout(path, links.iter().map(String::as_str), []);
    let current = page.current_page();
    let active = highlight_active(&mut page.nav_links, &current);

    writeln!(out, "current page: {current}")?;
    for link in &page.nav_links {
        let href = link.href.as_deref().unwrap_or_default();
        match matching_rule(href, &current) {
            Some(rule) if link.is_active() => writeln!(out, "* {href} ({rule:?})")?,
            _ => writeln!(out, "  {href}")?,
        }
    }
    writeln!(out, "{active} active")?;
    Ok(())
}
