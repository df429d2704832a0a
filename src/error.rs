//! Errors at the crate's I/O boundary.
//!
//! Normalization and projection never fail; only reading input and
//! configuration can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading records or configuration
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Input is empty")]
    EmptyInput,

    #[error("Invalid {name} gateway '{url}': must be an http(s) URL")]
    InvalidGateway { name: &'static str, url: String },
}

/// Result alias for boundary operations
pub type Result<T> = std::result::Result<T, Error>;
