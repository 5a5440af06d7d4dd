//! Error types for asset store operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating, provisioning or configuring assets
#[derive(Error, Debug)]
pub enum AssetError {
    /// IO error while touching the asset store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container could not be written or read
    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// HTTP transport error while fetching a remote asset
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote server answered with a non-success status
    #[error("HTTP request to {url} failed with status: {status}")]
    HttpStatus {
        /// URL that was requested
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// URL scheme other than http/https
    #[error("Invalid URL scheme in {0:?}. Only http:// and https:// are supported")]
    InvalidUrl(String),

    /// Identifier that cannot be used as a file stem
    #[error("Invalid model identifier: {0:?}")]
    InvalidModelId(String),

    /// Source file name that would escape the models directory
    #[error("Invalid asset file name: {0:?}")]
    InvalidFileName(String),

    /// Config file exists but is not valid TOML for our schema
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Config {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Config file was explicitly requested but does not exist
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
}
