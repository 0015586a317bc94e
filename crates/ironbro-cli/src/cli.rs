use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use ironbro_core::ThemeCategory;

use crate::commands::{self, App};

#[derive(Debug, Parser)]
#[command(
    name = "ironbro",
    about = "Themes, navigation, sessions and maintenance for the ironbro26 fan club site",
    version
)]
pub struct Cli {
    /// Config file (default: <config dir>/ironbro/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store file (default: <data dir>/ironbro/storage.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List registered themes
    Themes {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
        #[arg(long)]
        json: bool,
    },

    /// Show, change or render the current theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Show which navigation links a page highlights
    Nav {
        /// Location path, e.g. /videos.html
        #[arg(long, default_value = "/")]
        path: String,
        /// Link hrefs, e.g. ./index.html
        links: Vec<String>,
    },

    /// Check whether the admin UI is visible for the stored session
    Admin {
        /// Check the bare `userEmail` key instead of the session record
        #[arg(long)]
        legacy: bool,
    },

    /// Write or clear the stored session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Register through the signup endpoint
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Overrides `signup.endpoint` from the config
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Add the theme script to every configured page, then lint it
    Inject {
        /// Site root holding the HTML pages
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Check a script for unbalanced braces, brackets and parentheses
    Lint { file: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Current,
    /// Persist a new theme and announce it
    Set { id: String },
    /// Print the CSS for a theme (current one by default)
    Css { id: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum SessionAction {
    Set {
        #[arg(long)]
        email: String,
        /// admin, owner or user
        #[arg(long, default_value = "user")]
        role: String,
    },
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Standard,
    Brosquad,
}

impl From<CategoryArg> for ThemeCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Standard => ThemeCategory::Standard,
            CategoryArg::Brosquad => ThemeCategory::Brosquad,
        }
    }
}

pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    // These two never touch the store or the config
    match &cli.command {
        Commands::Nav { path, links } => return commands::nav::run(path, links, out),
        Commands::Lint { file } => return commands::maintain::lint(file, out),
        _ => {}
    }

    let app = App::load(cli.config.as_deref(), cli.store.as_deref())?;
    match cli.command {
        Commands::Themes { category, json } => {
            commands::theme::list(&app, category.map(Into::into), json, out)
        }
        Commands::Theme { action } => match action {
            ThemeAction::Current => commands::theme::current(&app, out),
            ThemeAction::Set { id } => commands::theme::set(&app, &id, out),
            ThemeAction::Css { id } => commands::theme::css(&app, id.as_deref(), out),
        },
        Commands::Admin { legacy } => commands::admin::check(&app, legacy, out),
        Commands::Session { action } => match action {
            SessionAction::Set { email, role } => {
                commands::admin::set_session(&app, &email, &role, out)
            }
            SessionAction::Clear => commands::admin::clear_session(&app, out),
        },
        Commands::Signup {
            email,
            password,
            endpoint,
        } => commands::signup::run(&app, &email, &password, endpoint.as_deref(), out).await,
        Commands::Inject { root } => commands::maintain::inject(&app, &root, out),
        Commands::Nav { .. } | Commands::Lint { .. } => Ok(()),
    }
}
