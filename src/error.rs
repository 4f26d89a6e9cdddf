// src/error.rs
// =============================================================================
// Error types for the scanner library.
//
// Two separate families:
// - ScanError: things that stop a scan from starting or from being reported
//   (bad seed URL, bad config, HTTP client construction, I/O, parsing)
// - FetchError: why a single page could not be fetched. The crawler records
//   these per URL and keeps going, so they never bubble up with `?`.
//
// "Nothing to analyze" is deliberately not an error here: see
// pipeline::ScanOutcome.
// =============================================================================

use thiserror::Error;

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The seed URL has no parseable host, so there is no scope to crawl
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    /// Configuration values are out of range or contradictory
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScanError {
    /// Create an invalid seed error.
    pub fn invalid_seed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSeedUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Why fetching one URL failed.
///
/// Every variant is treated the same way by the crawler (log, skip, continue);
/// the distinction only matters for reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Categorize a reqwest error into one of our fetch failure kinds.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else if error.is_body() || error.is_decode() {
            Self::Body(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }
}
