mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, ListArgs};
use softstore::config::Config;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "softstore=info".into())
}

/// The browser owns the terminal, so its logs go to a file instead of stderr.
fn init_logging(to_file: bool) -> anyhow::Result<()> {
    if to_file {
        let path = Config::log_path()?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdout) {
            Command::Browse
        } else {
            Command::List(ListArgs::default())
        }
    });

    init_logging(matches!(command, Command::Browse))?;

    let cfg = Config::load()?;
    let catalog_source = cli.catalog.as_deref().or(cfg.catalog_path.as_deref());
    let catalog = cli::load_catalog(&cfg, cli.catalog.as_deref())?;

    match command {
        Command::Browse => cli::browse::run(&cfg, catalog).await,
        Command::List(args) => cli::list::run(&catalog, &args),
        Command::Categories => cli::list::categories(&catalog),
        Command::Show { app, no_review } => cli::show::run(&cfg, &catalog, &app, no_review).await,
        Command::Review { app, json } => cli::show::review(&cfg, &catalog, &app, json).await,
        Command::Download { app, dir } => {
            let dir = dir.unwrap_or_else(|| cfg.download_dir());
            cli::download::run(&catalog, &app, &dir).await
        }
        Command::Login { key } => cli::login::run(&cfg, key.as_deref()).await,
        Command::Logout => cli::logout::run(&cfg).await,
        Command::Status => cli::status::run(&cfg, &catalog, catalog_source).await,
    }
}
