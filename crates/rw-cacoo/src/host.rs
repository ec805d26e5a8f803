//! Callbacks into the documentation build driving the converter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Build-side collaborator of [`CacooImageConverter`](crate::CacooImageConverter).
///
/// The host tracks generated image files for the current document and shows
/// warnings to the documentation author.
pub trait ImageHost {
    /// Record a generated image and the remote URI it was downloaded from.
    fn register_image(&mut self, path: &Path, original_uri: &str);

    /// Report a non-fatal problem to the author.
    fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// [`ImageHost`] that keeps registered images and warnings in memory.
///
/// Warnings are only collected; the caller decides how to show them.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    /// Generated image path -> original remote URI.
    pub images: BTreeMap<PathBuf, String>,
    pub warnings: Vec<String>,
}

impl ImageHost for ImageRegistry {
    fn register_image(&mut self, path: &Path, original_uri: &str) {
        self.images
            .insert(path.to_path_buf(), original_uri.to_owned());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_owned());
    }
}
