//! Cross-platform resolution of the configuration directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "playlist-pace";
const CONFIG_FILE: &str = "config.toml";

/// Get the configuration directory.
///
/// Priority order:
/// 1. `~/.playlist-pace` when it already exists
/// 2. Platform config directory (XDG on Linux, Application Support on macOS)
/// 3. `~/.playlist-pace` as the default for a fresh install
pub fn config_dir() -> Result<PathBuf> {
    let home_dir = home::home_dir().map(|h| h.join(format!(".{}", APP_DIR)));

    if let Some(dir) = &home_dir {
        if dir.is_dir() {
            return Ok(dir.clone());
        }
    }

    if let Some(platform) = dirs::config_dir() {
        let dir = platform.join(APP_DIR);
        if dir.is_dir() {
            return Ok(dir);
        }
    }

    home_dir.context("Could not find home directory")
}

/// Path of the config file, which may not exist yet.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Ensure a directory exists and is writable by the current user.
///
/// Creates the directory if it doesn't exist, then tests write access
/// by creating and removing a temporary file.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let test_path = dir.join(".write_test");
    fs::write(&test_path, b"test")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;

    // File might be held by antivirus on Windows
    let _ = fs::remove_file(&test_path);

    Ok(())
}
