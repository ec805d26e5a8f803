//! Image references found in a document tree.

use std::collections::BTreeMap;

/// Candidate key for "any format", set by the host before conversion.
pub const WILDCARD: &str = "?";

/// MIME type of the images produced by Cacoo.
pub const PNG_MIME: &str = "image/png";

/// An image reference owned by the host's document tree.
///
/// `candidates` maps a MIME type (or [`WILDCARD`]) to the path or URI the
/// host should use for that format. A successful conversion points `uri` and
/// the `image/png` candidate at the local cache and drops the wildcard; any
/// other candidate is kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub uri: String,
    pub candidates: BTreeMap<String, String>,
}

impl ImageReference {
    /// Create a reference with a single wildcard candidate pointing at `uri`.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let candidates = BTreeMap::from([(WILDCARD.to_owned(), uri.clone())]);
        Self { uri, candidates }
    }

    /// Point the reference at a locally cached PNG.
    pub(crate) fn set_local_png(&mut self, path: &str) {
        self.candidates.remove(WILDCARD);
        self.candidates.insert(PNG_MIME.to_owned(), path.to_owned());
        path.clone_into(&mut self.uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_has_wildcard_candidate() {
        let reference = ImageReference::new("https://cacoo.com/diagrams/X");
        assert_eq!(reference.uri, "https://cacoo.com/diagrams/X");
        assert_eq!(
            reference.candidates,
            BTreeMap::from([("?".to_owned(), "https://cacoo.com/diagrams/X".to_owned())])
        );
    }

    #[test]
    fn test_set_local_png() {
        let mut reference = ImageReference::new("https://cacoo.com/diagrams/X");
        reference
            .candidates
            .insert("image/svg+xml".to_owned(), "other.svg".to_owned());

        reference.set_local_png("_images/cacoo/abc.png");

        assert_eq!(reference.uri, "_images/cacoo/abc.png");
        assert_eq!(
            reference.candidates,
            BTreeMap::from([
                ("image/png".to_owned(), "_images/cacoo/abc.png".to_owned()),
                ("image/svg+xml".to_owned(), "other.svg".to_owned()),
            ])
        );
    }
}
