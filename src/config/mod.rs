//! Configuration module for breachwatch
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;

/// Locate and load settings, then apply environment overrides.
///
/// Returns the file the settings came from, if any.
pub fn load() -> Result<(Settings, Option<PathBuf>)> {
    let path = find_settings_file();
    let mut settings = match path {
        Some(ref path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok((settings, path))
}

fn find_settings_file() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = std::env::var("BREACHWATCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/breachwatch/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("breachwatch/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
