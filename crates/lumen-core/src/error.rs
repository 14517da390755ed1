//! Error types for Lumen

use thiserror::Error;

/// The main error type for Lumen operations
#[derive(Debug, Error)]
pub enum LumenError {
    #[error("Asset '{0}' declares no source candidates")]
    EmptySource(String),

    #[error("Unexpanded glob pattern in asset source: {0}")]
    UnexpectedGlob(String),

    #[error("Duplicate bundle name in manifest: {0}")]
    DuplicateBundleName(String),

    #[error("Unknown asset alias: {0}")]
    UnknownAlias(String),

    #[error("Asset #{index} in bundle '{bundle}' has no alias")]
    MissingAlias { bundle: String, index: usize },

    #[error("Asset with source '{0}' has no alias")]
    AnonymousAsset(String),

    #[error("Unknown bundle: {0}")]
    UnknownBundle(String),

    #[error("Manifest parse error: {0}")]
    ManifestParse(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Lumen operations
pub type Result<T> = std::result::Result<T, LumenError>;

impl From<toml::de::Error> for LumenError {
    fn from(err: toml::de::Error) -> Self {
        LumenError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for LumenError {
    fn from(err: serde_json::Error) -> Self {
        LumenError::ManifestParse(err.to_string())
    }
}
