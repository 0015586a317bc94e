//! `inject` and `lint` commands

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::maintenance::{check_braces, run_injection, InjectionSummary};

use super::App;

fn list_or_none(files: &[String]) -> String {
    if files.is_empty() {
        "none".to_string()
    } else {
        files.join(", ")
    }
}

fn print_summary(summary: &InjectionSummary, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Updated: {}", list_or_none(&summary.updated))?;
    writeln!(out, "Skipped (already): {}", list_or_none(&summary.skipped))?;
    writeln!(out, "Missing <head>: {}", list_or_none(&summary.missing_head))?;
    writeln!(out, "Not found: {}", list_or_none(&summary.not_found))?;
    for (file, error) in &summary.errors {
        writeln!(out, "Error in {file}: {error}")?;
    }
    Ok(())
}

/// Inject the theme script into the configured pages, then lint the script
pub fn inject(app: &App, root: &Path, out: &mut dyn Write) -> Result<()> {
    let maintenance = &app.config.maintenance;
    let summary = run_injection(
        root,
        maintenance.html_files.as_slice(),
        &maintenance.script_path,
        &maintenance.default_theme_attribute,
    );
    print_summary(&summary, out)?;
    if summary.is_clean() {
        writeln!(out, "All pages up to date")?;
    } else {
        warn!("Inject: some pages need attention under {}", root.display());
    }

    let script = root.join(&maintenance.script_path);
    if script.exists() {
        let text = fs::read_to_string(&script)
            .with_context(|| format!("reading {}", script.display()))?;
        writeln!(out, "{}: {}", maintenance.script_path, check_braces(&text))?;
    } else {
        warn!("Inject: {} not found, skipping lint", script.display());
    }
    Ok(())
}

pub fn lint(file: &Path, out: &mut dyn Write) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let report = check_braces(&text);
    if !report.is_balanced() {
        bail!("{}: {}", file.display(), report);
    }
    writeln!(out, "{}: {}", file.display(), report)?;
    Ok(())
}
