pub mod browse;
pub mod download;
pub mod list;
pub mod login;
pub mod logout;
pub mod show;
pub mod status;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use softstore::catalog::{AppRecord, Catalog, Category, Os};
use softstore::config::Config;
use softstore::filter::{self, FilterCriteria};

#[derive(Parser)]
#[command(name = "softstore", about = "Browse a software catalog with AI-written reviews.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Load the catalog from a JSON file instead of the built-in one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse the storefront interactively (default on a terminal)
    Browse,

    /// List apps, optionally filtered
    List(ListArgs),

    /// Show the category labels
    Categories,

    /// Show an app's details and its AI review
    Show {
        /// App id or name
        app: String,

        /// Skip fetching the AI review
        #[arg(long)]
        no_review: bool,
    },

    /// Print only the AI review for an app
    Review {
        /// App id or name
        app: String,

        /// Print the review as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the simulated download and save the setup file
    Download {
        /// App id or name
        app: String,

        /// Directory to save into (default: your Downloads folder)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Store a Gemini API key for AI reviews
    Login {
        /// Use this key instead of prompting
        #[arg(long)]
        key: Option<String>,
    },

    /// Remove the stored API key
    Logout,

    /// Show configuration and credential status
    Status,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Text to look for in names and descriptions (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category name, or "All"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Platform: Windows, Mac, Android, iOS, Web, or "All"
    #[arg(short, long)]
    pub os: Option<String>,
}

impl ListArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let category = match self.category.as_deref() {
            Some(c) => filter::parse_scope::<Category>(c).map_err(anyhow::Error::msg)?,
            None => None,
        };
        let os = match self.os.as_deref() {
            Some(o) => filter::parse_scope::<Os>(o).map_err(anyhow::Error::msg)?,
            None => None,
        };
        Ok(FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            category,
            os,
        })
    }
}

/// `--catalog` wins over `catalog_path` in the config; otherwise the seed.
pub fn load_catalog(cfg: &Config, flag: Option<&Path>) -> Result<Arc<Catalog>> {
    let catalog = match flag.or(cfg.catalog_path.as_deref()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Could not use catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    Ok(Arc::new(catalog))
}

pub fn find_app<'c>(catalog: &'c Catalog, key: &str) -> Result<&'c AppRecord> {
    catalog.find(key).with_context(|| {
        format!("No app matching '{key}'. Run `softstore list` to see what's available.")
    })
}

pub fn stars(app: &AppRecord) -> String {
    let filled = app.stars();
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn about_text(app: &AppRecord) -> String {
    format!(
        "Download {name} today to experience one of the leading applications in the {category} category. \
         Optimized for {os}, it ensures stability and performance for all your needs.",
        name = app.name,
        category = app.category,
        os = app.os,
    )
}
