//! Theme script injection into the site's HTML pages

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

static HEAD_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</head>").unwrap());
static HEAD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head[^>]*>").unwrap());
static HTML_WITH_THEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html[^>]*data-theme").unwrap());
static HTML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
    /// The page already references the script
    AlreadyPresent,
    Updated(String),
    /// Neither `</head>` nor `<head ...>` was found
    MissingHead,
}

/// Insert the theme script tag and a default `data-theme` into one page
pub fn inject_theme(content: &str, script_path: &str, default_theme: &str) -> InjectOutcome {
    if content.contains(script_path) {
        return InjectOutcome::AlreadyPresent;
    }

    let tag = format!("<script src=\"{script_path}\"></script>");
    let mut updated = if let Some(m) = HEAD_CLOSE.find(content) {
        format!("{}{}\n{}", &content[..m.start()], tag, &content[m.start()..])
    } else if let Some(m) = HEAD_OPEN.find(content) {
        format!("{}\n{}{}", &content[..m.end()], tag, &content[m.end()..])
    } else {
        return InjectOutcome::MissingHead;
    };

    if !HTML_WITH_THEME.is_match(&updated) {
        if let Some(m) = HTML_OPEN.find(&updated) {
            let attribute = format!(" data-theme=\"{default_theme}\"");
            updated.insert_str(m.end(), &attribute);
        }
    }

    InjectOutcome::Updated(updated)
}

/// `<file>.bak-<timestamp>` with `:` and `.` made filename-safe
pub fn backup_path(path: &Path) -> PathBuf {
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".bak-{stamp}"));
    PathBuf::from(name)
}

fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup)
        .with_context(|| format!("backing up {} to {}", path.display(), backup.display()))?;
    Ok(backup)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InjectionSummary {
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
    pub missing_head: Vec<String>,
    pub not_found: Vec<String>,
    pub errors: Vec<(String, String)>,
}

impl InjectionSummary {
    pub fn is_clean(&self) -> bool {
        self.missing_head.is_empty() && self.not_found.is_empty() && self.errors.is_empty()
    }
}

fn update_file(path: &Path, script_path: &str, default_theme: &str) -> Result<InjectOutcome> {
    let original =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let outcome = inject_theme(&original, script_path, default_theme);
    if let InjectOutcome::Updated(content) = &outcome {
        let backup = backup_file(path)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "Inject: updated {} (backup {})",
            path.display(),
            backup.display()
        );
    }
    Ok(outcome)
}

/// Inject into every listed page under `root`
pub fn run_injection<S: AsRef<str>>(
    root: &Path,
    files: &[S],
    script_path: &str,
    default_theme: &str,
) -> InjectionSummary {
    let mut summary = InjectionSummary::default();
    for file in files {
        let file = file.as_ref();
        let path = root.join(file);
        if !path.exists() {
            warn!("Inject: {} not found", path.display());
            summary.not_found.push(file.to_string());
            continue;
        }

        match update_file(&path, script_path, default_theme) {
            Ok(InjectOutcome::Updated(_)) => summary.updated.push(file.to_string()),
            Ok(InjectOutcome::AlreadyPresent) => summary.skipped.push(file.to_string()),
            Ok(InjectOutcome::MissingHead) => {
                warn!("Inject: no <head> in {}", path.display());
                summary.missing_head.push(file.to_string());
            }
            Err(e) => {
                warn!("Inject: {:#}", e);
                summary.errors.push((file.to_string(), format!("{e:#}")));
            }
        }
    }
    summary
}
