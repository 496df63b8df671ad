//! Configuration management for the tracker

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::progress::LoadPolicy;
use crate::theme::Theme;

const APP_NAME: &str = "roadmap-tracker";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Colored terminal output
    pub color: bool,

    /// How stored progress is combined with the roadmap on startup
    pub load_policy: LoadPolicy,

    /// Where progress is stored, instead of the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Roadmap file to use instead of the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            color: true,
            load_policy: LoadPolicy::default(),
            data_dir: None,
            roadmap_path: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {:?}", path))
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", APP_NAME).context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the directory progress is stored in
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let proj_dirs =
            ProjectDirs::from("", "", APP_NAME).context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the active theme, falling back to the default for unknown names
    pub fn active_theme(&self) -> Theme {
        Theme::by_name(&self.theme).unwrap_or_default()
    }
}
