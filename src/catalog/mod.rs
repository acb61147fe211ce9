pub mod seed;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Opaque catalog identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Browsers,
    Security,
    Productivity,
    Multimedia,
    Development,
    Communication,
    Utilities,
    Games,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Browsers,
        Category::Security,
        Category::Productivity,
        Category::Multimedia,
        Category::Development,
        Category::Communication,
        Category::Utilities,
        Category::Games,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Browsers => "Browsers",
            Category::Security => "Security",
            Category::Productivity => "Productivity",
            Category::Multimedia => "Multimedia",
            Category::Development => "Development",
            Category::Communication => "Communication",
            Category::Utilities => "Utilities",
            Category::Games => "Games",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category '{s}'"))
    }
}

/// Target platform of a listed app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    Windows,
    Mac,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Web,
}

impl Os {
    pub const ALL: [Os; 5] = [Os::Windows, Os::Mac, Os::Android, Os::Ios, Os::Web];

    pub fn label(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::Mac => "Mac",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::Web => "Web",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("macos") {
            return Ok(Os::Mac);
        }
        Os::ALL
            .into_iter()
            .find(|o| o.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown platform '{s}'. Use Windows, Mac, Android, iOS or Web"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    Free,
    Trial,
    Paid,
    #[serde(rename = "Open Source")]
    OpenSource,
}

impl License {
    pub fn label(&self) -> &'static str {
        match self {
            License::Free => "Free",
            License::Trial => "Trial",
            License::Paid => "Paid",
            License::OpenSource => "Open Source",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A listed application. Never mutated after the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id: AppId,
    pub name: String,
    pub developer: String,
    pub category: Category,
    pub os: Os,
    pub license: License,
    pub version: String,
    /// Display string, e.g. "12M".
    pub downloads: String,
    /// 0–10
    pub rating: f32,
    pub description: String,
}

impl AppRecord {
    /// Filled stars out of five, from the 0–10 rating.
    pub fn stars(&self) -> usize {
        ((self.rating / 2.0).floor().max(0.0) as usize).min(5)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate app id '{0}' in catalog")]
    DuplicateId(AppId),
    #[error("app '{id}' has rating {rating}, expected 0-10")]
    RatingOutOfRange { id: AppId, rating: f32 },
}

/// Read-only collection of listed apps, shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    apps: Vec<AppRecord>,
}

impl Catalog {
    pub fn new(apps: Vec<AppRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for app in &apps {
            if !seen.insert(&app.id) {
                return Err(CatalogError::DuplicateId(app.id.clone()));
            }
            if !(0.0..=10.0).contains(&app.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: app.id.clone(),
                    rating: app.rating,
                });
            }
        }
        Ok(Self { apps })
    }

    /// The seed catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            apps: seed::SEED.iter().map(seed::SeedApp::to_record).collect(),
        }
    }

    /// Load a catalog from a JSON array of app records.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let apps: Vec<AppRecord> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::new(apps)?;
        tracing::debug!("Loaded {} apps from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn apps(&self) -> &[AppRecord] {
        &self.apps
    }

    pub fn get(&self, id: &AppId) -> Option<&AppRecord> {
        self.apps.iter().find(|a| &a.id == id)
    }

    /// Look up by id, falling back to a case-insensitive name match.
    pub fn find(&self, key: &str) -> Option<&AppRecord> {
        self.apps
            .iter()
            .find(|a| a.id.as_str() == key)
            .or_else(|| self.apps.iter().find(|a| a.name.eq_ignore_ascii_case(key)))
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Labels for the category bar, "All" first.
    pub fn category_labels(&self) -> Vec<&'static str> {
        std::iter::once("All")
            .chain(Category::ALL.iter().map(Category::label))
            .collect()
    }
}
