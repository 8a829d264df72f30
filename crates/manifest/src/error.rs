//! Error types for the manifest crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a manifest
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest file missing or unreadable
    #[error("Infrastructure file is not accessible, {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML
    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    /// Structurally valid but semantically wrong (e.g., duplicate compartment)
    #[error("invalid manifest: {0}")]
    Invalid(String),
}

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;
