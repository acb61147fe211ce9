use anyhow::Result;
use softstore::config::{Config, KeySource};

pub async fn run(cfg: &Config) -> Result<()> {
    if cfg.api_key.is_none() {
        println!("No API key stored.");
        return Ok(());
    }

    let mut cfg = cfg.clone();
    cfg.api_key = None;
    cfg.save()?;

    println!("✓ API key removed. Reviews will use local summaries.");
    if let KeySource::Env(name) = cfg.api_key_source() {
        println!("Note: ${name} is still set in your environment.");
    }
    Ok(())
}
