//! Error types for the fetch collaborator.

use thiserror::Error;

/// Errors produced while fetching and unpacking boundary data.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to unpack archive: {0}")]
    Unpack(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("core error: {0}")]
    Core(#[from] regionate_core::Error),
}

/// Result alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
