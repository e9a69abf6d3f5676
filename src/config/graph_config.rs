//! churros-graphs configuration file handling
//!
//! Loads and manages the ~/.config/churros-graphs/config.yaml file.

use super::sections::{ApiConfig, CacheSettings, FilterConfig, OutputConfig};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// churros-graphs configuration
///
/// The static configuration surface of a run: where to query, which
/// memberships count, and where the graph and cache live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Arrow eligibility filter
    #[serde(default)]
    pub filter: FilterConfig,

    /// Graph output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheSettings,
}

impl GraphConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no file exists there
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::ChurrosGraphsError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            group_types = config.filter.group_types.len(),
            max_year_tier = config.filter.max_year_tier,
            show_labels = config.output.show_labels,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/churros-graphs/config.yaml)
    pub fn default_path() -> PathBuf {
        // Always use ~/.config for consistency across platforms (macOS, Linux)
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("churros-graphs");
        path.push("config.yaml");
        path
    }
}
