//! Cacoo service endpoints and defaults.

use std::time::Duration;

/// Public URL prefix of Cacoo diagrams embedded in documentation.
pub const DEFAULT_BASE_URI: &str = "https://cacoo.com/diagrams/";

/// Cacoo REST API root.
pub const DEFAULT_API_URL: &str = "https://cacoo.com/api/v1";

/// Default HTTP timeout for Cacoo requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
