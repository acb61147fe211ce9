use anyhow::Result;
use dialoguer::Password;
use dialoguer::theme::ColorfulTheme;

use softstore::config::{Config, KeySource};

pub async fn run(cfg: &Config, key: Option<&str>) -> Result<()> {
    println!("softstore AI review setup\n");

    let key = match key {
        Some(k) => k.trim().to_string(),
        None => {
            println!("Get a key at https://aistudio.google.com/apikey");
            Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Gemini API key")
                .interact()?
                .trim()
                .to_string()
        }
    };

    if key.is_empty() {
        anyhow::bail!("API key required.");
    }

    let mut cfg = cfg.clone();
    cfg.api_key = Some(key);
    cfg.save()?;

    println!("✓ API key saved to {}", Config::config_path()?.display());

    if let KeySource::Env(name) = cfg.api_key_source() {
        println!("Note: ${name} is set and takes precedence over the saved key.");
    }

    Ok(())
}
