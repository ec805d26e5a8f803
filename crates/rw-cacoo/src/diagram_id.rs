//! Cacoo URL matching and diagram identifier normalization.
//!
//! A diagram reference looks like `https://cacoo.com/diagrams/<id>#<sheet>`.
//! The two Cacoo endpoints address it differently:
//!
//! - metadata (`/diagrams/<id>.json`) is per diagram, so the sheet suffix
//!   after `#` or `-` is dropped
//! - images (`/diagrams/<id>-<sheet>.png`) are per sheet, so `#` becomes `-`

use std::fmt;

/// Check whether `uri` points into the diagram space rooted at `base`.
///
/// Plain case-sensitive prefix test, no trailing slash normalization.
#[must_use]
pub fn matches(uri: &str, base: &str) -> bool {
    uri.starts_with(base)
}

/// Remove the `base` prefix from `uri` exactly once.
///
/// Callers are expected to have checked [`matches`] first; a non-matching
/// `uri` is returned unchanged.
#[must_use]
pub fn to_diagram_id<'a>(uri: &'a str, base: &str) -> &'a str {
    uri.strip_prefix(base).unwrap_or(uri)
}

/// Truncate a diagram identifier at the first `#` or `-`.
#[must_use]
pub fn to_metadata_id(diagram_id: &str) -> &str {
    match diagram_id.find(['#', '-']) {
        Some(end) => &diagram_id[..end],
        None => diagram_id,
    }
}

/// Rewrite the `#` sheet separator into the `-` the image endpoint expects.
#[must_use]
pub fn to_fetch_id(diagram_id: &str) -> String {
    diagram_id.replace('#', "-")
}

/// Identifier of a Cacoo diagram, possibly qualified with a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramId(String);

impl DiagramId {
    /// Wrap a raw identifier such as `ABCD1234` or `ABCD1234#sheet2`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the identifier from a reference URI.
    ///
    /// Returns `None` when `uri` does not start with `base`.
    #[must_use]
    pub fn from_uri(uri: &str, base: &str) -> Option<Self> {
        matches(uri, base).then(|| Self::new(to_diagram_id(uri, base)))
    }

    /// The identifier as written in the reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier for metadata lookups (sheet suffix removed).
    #[must_use]
    pub fn metadata_id(&self) -> &str {
        to_metadata_id(&self.0)
    }

    /// Identifier for image downloads (`#` replaced by `-`).
    #[must_use]
    pub fn fetch_id(&self) -> String {
        to_fetch_id(&self.0)
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_BASE_URI;

    #[test]
    fn test_matches_prefix() {
        assert!(matches(
            "https://cacoo.com/diagrams/ABCD1234",
            DEFAULT_BASE_URI
        ));
        assert!(matches("https://cacoo.com/diagrams/", DEFAULT_BASE_URI));
    }

    #[test]
    fn test_matches_rejects_other_urls() {
        assert!(!matches("https://example.com/other.png", DEFAULT_BASE_URI));
        assert!(!matches("", DEFAULT_BASE_URI));
        assert!(!matches("images/local.png", DEFAULT_BASE_URI));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        assert!(!matches(
            "https://CACOO.com/diagrams/ABCD",
            DEFAULT_BASE_URI
        ));
        assert!(!matches(
            "HTTPS://cacoo.com/diagrams/ABCD",
            DEFAULT_BASE_URI
        ));
    }

    #[test]
    fn test_matches_does_not_normalize_trailing_slash() {
        assert!(!matches("https://cacoo.com/diagrams", DEFAULT_BASE_URI));
        assert!(!matches("https://cacoo.com/diagramsABCD", DEFAULT_BASE_URI));
    }

    #[test]
    fn test_to_diagram_id_strips_prefix_once() {
        assert_eq!(
            to_diagram_id("https://cacoo.com/diagrams/ABCD1234", DEFAULT_BASE_URI),
            "ABCD1234"
        );
        // Only the leading prefix is removed
        assert_eq!(
            to_diagram_id(
                "https://cacoo.com/diagrams/https://cacoo.com/diagrams/X",
                DEFAULT_BASE_URI
            ),
            "https://cacoo.com/diagrams/X"
        );
    }

    #[test]
    fn test_to_diagram_id_keeps_sheet_fragment() {
        assert_eq!(
            to_diagram_id("https://cacoo.com/diagrams/abc123#sheetA", DEFAULT_BASE_URI),
            "abc123#sheetA"
        );
    }

    #[test]
    fn test_to_metadata_id() {
        assert_eq!(to_metadata_id("abc123#sheetA"), "abc123");
        assert_eq!(to_metadata_id("abc123-sheetB"), "abc123");
        assert_eq!(to_metadata_id("abc123"), "abc123");
        assert_eq!(to_metadata_id("abc-123#sheet"), "abc");
        assert_eq!(to_metadata_id(""), "");
    }

    #[test]
    fn test_to_fetch_id() {
        assert_eq!(to_fetch_id("abc123#sheetA"), "abc123-sheetA");
        assert_eq!(to_fetch_id("abc123"), "abc123");
        assert_eq!(to_fetch_id("abc123-sheetB"), "abc123-sheetB");
    }

    #[test]
    fn test_diagram_id_from_uri() {
        let id = DiagramId::from_uri(
            "https://cacoo.com/diagrams/ABCD1234#sheet2",
            DEFAULT_BASE_URI,
        )
        .unwrap();

        assert_eq!(id.as_str(), "ABCD1234#sheet2");
        assert_eq!(id.metadata_id(), "ABCD1234");
        assert_eq!(id.fetch_id(), "ABCD1234-sheet2");
        assert_eq!(id.to_string(), "ABCD1234#sheet2");
    }

    #[test]
    fn test_diagram_id_from_uri_no_match() {
        assert!(DiagramId::from_uri("https://example.com/other.png", DEFAULT_BASE_URI).is_none());
    }

    #[test]
    fn test_custom_base() {
        let base = "https://cacoo.example.org/d/";
        let id = DiagramId::from_uri("https://cacoo.example.org/d/XYZ", base).unwrap();
        assert_eq!(id.as_str(), "XYZ");
        assert!(DiagramId::from_uri("https://cacoo.com/diagrams/XYZ", base).is_none());
    }
}
