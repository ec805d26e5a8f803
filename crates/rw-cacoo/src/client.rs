//! Cacoo REST API client.
//!
//! Provides a sync HTTP client for the two read-only endpoints used to embed
//! diagrams:
//!
//! - `GET {api}/diagrams/{metadata_id}.json?apiKey={key}` (diagram metadata)
//! - `GET {api}/diagrams/{fetch_id}.png?apiKey={key}` (rendered sheet)
//!
//! The API key is passed as a query parameter and never appears in log
//! lines or error messages.

use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::consts::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::error::FetchError;

/// Diagram metadata returned by the `.json` endpoint.
///
/// Only `updated` is required; the remaining fields are kept when Cacoo
/// sends them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramInfo {
    /// Last modification time, RFC 2822 formatted.
    pub updated: String,
    pub diagram_id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub created: Option<String>,
    #[serde(default)]
    pub sheets: Vec<SheetInfo>,
}

impl DiagramInfo {
    /// `updated` as seconds since the Unix epoch.
    pub fn updated_timestamp(&self) -> Result<i64, FetchError> {
        parse_updated(&self.updated)
    }
}

/// A single sheet (page) of a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub uid: String,
    pub name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Parse an RFC 2822 date (e.g. `Mon, 10 Aug 2009 17:00:00 +0900`) into
/// epoch seconds.
pub fn parse_updated(value: &str) -> Result<i64, FetchError> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|dt| dt.timestamp())
        .map_err(|source| FetchError::InvalidDate {
            value: value.to_owned(),
            source,
        })
}

/// Remote source of diagram metadata and images.
///
/// [`CacooClient`] is the HTTP implementation. Implementations must be
/// thread-safe for parallel batch resolution.
pub trait DiagramSource: Send + Sync {
    /// Fetch metadata for a diagram.
    ///
    /// `metadata_id` must not carry a sheet suffix.
    fn fetch_metadata(&self, metadata_id: &str) -> Result<DiagramInfo, FetchError>;

    /// Fetch the rendered PNG for a diagram or sheet.
    ///
    /// `fetch_id` uses `-` as the sheet separator.
    fn fetch_image(&self, fetch_id: &str) -> Result<Vec<u8>, FetchError>;

    /// Last modification time of a diagram in epoch seconds.
    fn last_modified(&self, metadata_id: &str) -> Result<i64, FetchError> {
        self.fetch_metadata(metadata_id)?.updated_timestamp()
    }
}

/// Cacoo REST API client.
pub struct CacooClient {
    agent: Agent,
    api_url: String,
    api_key: String,
}

impl CacooClient {
    /// Create a client for the public Cacoo API with the default timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_options(DEFAULT_API_URL, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client for a custom API root and timeout.
    ///
    /// # Arguments
    /// * `api_url` - API root, e.g. `https://cacoo.com/api/v1`
    /// * `api_key` - Cacoo API key
    /// * `timeout` - Global per-request timeout
    #[must_use]
    pub fn with_options(api_url: &str, api_key: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    /// URL of a diagram resource, without the API key.
    fn diagram_url(&self, id: &str, extension: &str) -> String {
        format!("{}/diagrams/{id}.{extension}", self.api_url)
    }

    /// Issue a GET request and return the body of a successful response.
    fn get_bytes(&self, id: &str, extension: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.diagram_url(id, extension);
        debug!("GET {url}");

        let response = self.agent.get(&url).query("apiKey", &self.api_key).call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(status_error(status, id, error_body));
        }

        Ok(body.read_to_vec()?)
    }
}

impl DiagramSource for CacooClient {
    fn fetch_metadata(&self, metadata_id: &str) -> Result<DiagramInfo, FetchError> {
        let body = self.get_bytes(metadata_id, "json")?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn fetch_image(&self, fetch_id: &str) -> Result<Vec<u8>, FetchError> {
        self.get_bytes(fetch_id, "png")
    }
}

/// Map an HTTP error status to a [`FetchError`].
///
/// Authentication failures and unknown diagrams get their own variants so
/// the warning tells a bad key apart from a bad diagram id.
fn status_error(status: u16, id: &str, body: String) -> FetchError {
    match status {
        401 | 403 => FetchError::Unauthorized { status },
        404 => FetchError::NotFound { id: id.to_owned() },
        _ => FetchError::Status { status, body },
    }
}
