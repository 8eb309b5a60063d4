//! Configuration file support.
//!
//! Settings load from the first of: an explicit `--config` path, a
//! `bx-skills.toml` in the working directory, or
//! `<config dir>/bx-skills/config.toml`. Only the explicit path reports
//! read and parse errors; the search locations fall through to defaults
//! so a stray broken file never blocks the tool.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Catalog location. Overrides the data-dir default; the --catalog
    /// flag overrides both.
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Fallbacks applied when a command is run without --target or --scope.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    /// Used by install and uninstall; status always defaults to both
    /// scopes.
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            scope: default_scope(),
        }
    }
}

fn default_targets() -> Vec<String> {
    vec!["auto".to_string()]
}

fn default_scope() -> String {
    "user".to_string()
}

/// Catalog location when neither the config file nor --catalog names
/// one.
pub fn default_catalog_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bx-skills")
        .join("catalog")
}

impl Config {
    /// Load configuration from a specific path, or use default search
    /// paths.
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        // If explicit path provided, use it
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path)
                .with_context(|| format!("Failed to load config from {}", config_path));
        }

        // Try working directory first (per-project config)
        if let Ok(config) = Self::load_from_path("bx-skills.toml") {
            debug!("Loaded config from ./bx-skills.toml");
            return Ok(config);
        }

        // Try user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("bx-skills").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
