use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variables checked for a Gemini key, in order.
pub const API_KEY_ENV_VARS: [&str; 3] = ["SOFTSTORE_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key. Environment variables take precedence.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Where simulated downloads are written. Defaults to the user's Downloads dir.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// JSON catalog to list instead of the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

/// Where the effective API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    ConfigFile,
    Missing,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            download_dir: None,
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::home_dir()
            .context("Could not determine home directory")?
            .join(".softstore");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("softstore.log"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, &contents)?;

        // Owner-only: the file may hold an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// The key to use for AI reviews, if any.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok()).0
    }

    pub fn api_key_source(&self) -> KeySource {
        self.resolve_api_key_with(|name| std::env::var(name).ok()).1
    }

    /// Blank values are treated as unset.
    pub fn resolve_api_key_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> (Option<String>, KeySource) {
        for name in API_KEY_ENV_VARS {
            if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
                return (Some(v.trim().to_string()), KeySource::Env(name));
            }
        }
        match self.api_key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => (Some(k.to_string()), KeySource::ConfigFile),
            _ => (None, KeySource::Missing),
        }
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let cfg = Config::parse(
            r#"
            api_key = "abc"
            model = "gemini-2.0-flash"
            request_timeout_secs = 5
            download_dir = "/tmp/dl"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.download_dir(), PathBuf::from("/tmp/dl"));
        assert_eq!(cfg.resolve_api_key_with(no_env), (Some("abc".into()), KeySource::ConfigFile));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::parse("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_env_beats_config_file() {
        let cfg = Config { api_key: Some("from-file".into()), ..Config::default() };
        let env = |name: &str| (name == "GEMINI_API_KEY").then(|| "from-env".to_string());
        assert_eq!(
            cfg.resolve_api_key_with(env),
            (Some("from-env".into()), KeySource::Env("GEMINI_API_KEY"))
        );
    }

    #[test]
    fn test_env_order() {
        let cfg = Config::default();
        let env = |name: &str| match name {
            "SOFTSTORE_API_KEY" => Some("first".to_string()),
            "API_KEY" => Some("last".to_string()),
            _ => None,
        };
        assert_eq!(cfg.resolve_api_key_with(env).0.as_deref(), Some("first"));
    }

    #[test]
    fn test_blank_values_are_missing() {
        let cfg = Config { api_key: Some("  ".into()), ..Config::default() };
        let env = |_: &str| Some(String::new());
        assert_eq!(cfg.resolve_api_key_with(env), (None, KeySource::Missing));
    }

    #[test]
    fn test_roundtrip_toml() {
        let cfg = Config { api_key: Some("k".into()), ..Config::default() };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::parse(&text).unwrap();
        assert_eq!(back.api_key.as_deref(), Some("k"));
        assert_eq!(back.api_url, cfg.api_url);
    }
}
