// src/error.rs
// =============================================================================
// Error type shared by the catalog modules.
//
// The command handlers in main.rs use anyhow (any error, plus context), but
// the modules underneath return this enum so callers can tell a 404 apart
// from a broken network or a bad config file.
// =============================================================================

use thiserror::Error;

/// Result alias used across the crate's modules
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Errors raised while talking to GitHub or touching post files
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Transport-level HTTP failure (DNS, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading or writing a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be parsed or joined
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The configuration file is unreadable or inconsistent
    #[error("Config error: {0}")]
    Config(String),

    /// The input does not name a GitHub repository
    #[error("Not a GitHub repository: {0}")]
    InvalidRepository(String),

    /// The server answered, but not with 2xx
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

impl ScoutError {
    /// True when the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoutError::Status { status: 404, .. })
    }
}
