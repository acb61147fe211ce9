use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::catalog::AppRecord;

/// `<Name with whitespace runs as _>_Setup.txt`
pub fn file_name(app_name: &str) -> String {
    let stem = app_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_Setup.txt")
}

pub fn render(app: &AppRecord) -> String {
    let search = url::Url::parse_with_params("https://example.com/search", [("q", app.name.as_str())])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| "https://example.com/search".to_string());

    format!(
        "Thank you for downloading {name} from SoftStore!\n\
         \n\
         App Name: {name}\n\
         Version: {version}\n\
         Developer: {developer}\n\
         License: {license}\n\
         \n\
         This is a simulated download file for demonstration purposes.\n\
         In a real application, this would be the installer executable.\n\
         \n\
         Visit the official website for real downloads: {search}\n",
        name = app.name,
        version = app.version,
        developer = app.developer,
        license = app.license,
    )
}

/// Write the artifact into `dir`, replacing any earlier copy.
pub fn save(dir: &Path, app: &AppRecord) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name(&app.name));
    std::fs::write(&path, render(app))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Saved {}", path.display());
    Ok(path)
}
