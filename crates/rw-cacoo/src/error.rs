//! Error types for Cacoo image resolution.

use std::path::PathBuf;

/// Error from the Cacoo API (metadata or image endpoint).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, unreadable body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Cacoo rejected the credentials (HTTP 401 or 403).
    #[error("API key rejected (HTTP {status}), check cacoo.api_key")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
    },

    /// Cacoo does not know the requested diagram or sheet (HTTP 404).
    #[error("diagram not found: {id}")]
    NotFound {
        /// Identifier sent to the API.
        id: String,
    },

    /// Any other non-success HTTP status.
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Metadata response body is not the expected JSON.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// `updated` timestamp is not an RFC 2822 date.
    #[error("invalid date {value:?}")]
    InvalidDate {
        /// Raw value from the API.
        value: String,
        /// Parser error.
        #[source]
        source: chrono::ParseError,
    },
}

/// Error writing an image into the local cache.
#[derive(Debug, thiserror::Error)]
#[error("failed to write cached image {}: {source}", path.display())]
pub struct StoreError {
    /// Path being created or written.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Any failure while converting a single reference.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Cached file path cannot be written back into a reference URI.
    #[error("cached image path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// Path of the stored image.
        path: PathBuf,
    },
}
