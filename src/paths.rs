//! Common paths for PoseStudio data storage
//!
//! Everything lives under ~/.config/posestudio/ on all platforms:
//! - config.toml - User configuration
//! - posestudio.sqlite - Favorites database
//! - downloads/ - Downloaded pose images (unless configured elsewhere)

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the PoseStudio data directory (~/.config/posestudio/)
pub fn posestudio_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("posestudio");
    fs::create_dir_all(&dir).context("Failed to create posestudio directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/posestudio/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(posestudio_dir()?.join("config.toml"))
}

/// Get the database file path (~/.config/posestudio/posestudio.sqlite)
pub fn database_path() -> Result<PathBuf> {
    Ok(posestudio_dir()?.join("posestudio.sqlite"))
}

/// Get the default download directory (~/.config/posestudio/downloads/)
pub fn downloads_dir() -> Result<PathBuf> {
    Ok(posestudio_dir()?.join("downloads"))
}
