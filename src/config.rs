//! Configuration module for PoseStudio

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::favorites::DEFAULT_STORAGE_KEY;
use crate::paths;

/// Environment variable overriding [`Config::supabase_url`]
pub const ENV_SUPABASE_URL: &str = "POSESTUDIO_SUPABASE_URL";
/// Environment variable overriding [`Config::supabase_anon_key`]
pub const ENV_SUPABASE_ANON_KEY: &str = "POSESTUDIO_SUPABASE_ANON_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Supabase project URL (e.g. `https://xyz.supabase.co`)
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Supabase anon (public) key
    #[serde(default)]
    pub supabase_anon_key: Option<String>,

    /// Storage key the favorites snapshot is kept under
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// Timeout for remote requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Where downloaded images go (defaults to ~/.config/posestudio/downloads)
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Use the bundled demo catalog instead of Supabase
    #[serde(default)]
    pub demo: bool,
}

fn default_favorites_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            favorites_key: default_favorites_key(),
            request_timeout_secs: default_request_timeout(),
            download_dir: None,
            demo: false,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path (or defaults), then apply env overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Override remote settings from the environment.
    ///
    /// `lookup` returns the value of a variable, `None` if unset. Empty
    /// values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_SUPABASE_URL).filter(|v| !v.is_empty()) {
            self.supabase_url = Some(url);
        }
        if let Some(key) = lookup(ENV_SUPABASE_ANON_KEY).filter(|v| !v.is_empty()) {
            self.supabase_anon_key = Some(key);
        }
    }

    /// Directory downloads are written to
    pub fn download_dir(&self) -> Result<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::downloads_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.favorites_key, "@posestudio:favorites");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.demo);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "supabase_url = \"https://abc.supabase.co\"\ndemo = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.supabase_url.as_deref(), Some("https://abc.supabase.co"));
        assert!(config.demo);
        assert_eq!(config.favorites_key, "@posestudio:favorites");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            supabase_anon_key: Some("anon".to_string()),
            favorites_key: "@test:favorites".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.supabase_anon_key.as_deref(), Some("anon"));
        assert_eq!(loaded.favorites_key, "@test:favorites");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            supabase_url: Some("https://file.supabase.co".to_string()),
            ..Config::default()
        };
        config.apply_env(|name| match name {
            ENV_SUPABASE_URL => Some(String::new()),
            ENV_SUPABASE_ANON_KEY => Some("from-env".to_string()),
            _ => None,
        });

        assert_eq!(config.supabase_url.as_deref(), Some("https://file.supabase.co"));
        assert_eq!(config.supabase_anon_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
