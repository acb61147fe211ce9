use anyhow::Result;
use std::path::Path;

use softstore::catalog::Catalog;
use softstore::config::{Config, KeySource};

/// `catalog_source` is the file the catalog was loaded from, if any.
pub async fn run(cfg: &Config, catalog: &Catalog, catalog_source: Option<&Path>) -> Result<()> {
    println!("softstore v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let key = match cfg.api_key_source() {
        KeySource::Env(name) => format!("set (${name}) ✓"),
        KeySource::ConfigFile => "set (config file) ✓".to_string(),
        KeySource::Missing => "not set".to_string(),
    };
    println!("API key:         {key}");
    println!("Model:           {}", cfg.model);
    println!("Endpoint:        {}", cfg.api_url);
    println!("Timeout:         {}s", cfg.request_timeout_secs);
    println!();

    let source = catalog_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    println!("Catalog:         {} apps ({source})", catalog.len());
    println!("Downloads:       {}", cfg.download_dir().display());
    println!("Config:          {}", Config::config_path()?.display());
    println!("Log:             {}", Config::log_path()?.display());

    if cfg.api_key_source() == KeySource::Missing {
        println!();
        println!("💡 Enable live AI reviews: softstore login");
    }

    Ok(())
}
