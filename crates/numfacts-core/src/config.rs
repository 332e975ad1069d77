use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::provider::{FactCategory, DEFAULT_API_URL};

pub const API_URL_ENV: &str = "NUMFACTS_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_url: None,
            category: Some(FactCategory::default().as_str().to_string()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// API base URL: environment first, then the config file, then the default.
    pub fn api_url(&self) -> String {
        Self::resolve_api_url(std::env::var(API_URL_ENV).ok(), self.api_url.as_deref())
    }

    fn resolve_api_url(from_env: Option<String>, from_file: Option<&str>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| from_file.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn category(&self) -> FactCategory {
        self.category
            .as_deref()
            .and_then(FactCategory::from_str)
            .unwrap_or_default()
    }

    /// `<config_dir>/numfacts/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("numfacts").join("config.json"))
    }
}
