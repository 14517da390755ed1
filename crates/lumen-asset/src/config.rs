//! Resolver configuration
//!
//! Loaded from the `[resolver]` table of a TOML file:
//!
//! ```toml
//! [resolver]
//! preferred_formats = ["avif", "webp", "png"]
//! base_path = "https://cdn.example.com/assets"
//! ```
//!
//! The `LUMEN_ASSET_BASE_PATH` environment variable overrides `base_path`.

use lumen_core::{LumenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the configured base path
pub const BASE_PATH_ENV: &str = "LUMEN_ASSET_BASE_PATH";

/// Settings applied when resolving without explicit preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Formats tried in order when a query names none
    #[serde(default)]
    pub preferred_formats: Vec<String>,
    /// Prefix joined onto relative sources of resolved assets
    #[serde(default)]
    pub base_path: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    resolver: ResolverConfig,
}

impl ResolverConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.resolver)
    }

    /// Load configuration from a file, then apply environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            LumenError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        let mut config = file.resolver;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var(BASE_PATH_ENV) {
            self.base_path = Some(base);
        }
    }
}
