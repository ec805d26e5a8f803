//! Content-addressed image cache.
//!
//! Images are stored under `{cache_root}/cacoo/{sha1}.png`, where `sha1` is
//! the lowercase hex SHA-1 of the image bytes. Identical images share one
//! file; files are never rewritten or deleted.
//!
//! New files are written to a temporary file in the target directory and
//! renamed into place, so readers never observe a partially written image.
//! Concurrent writers of the same digest race on the rename with identical
//! content, which is harmless.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::StoreError;

/// Subdirectory of the image root holding Cacoo images.
pub const CACHE_SUBDIR: &str = "cacoo";

/// Content-addressed store for downloaded diagram images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `cache_root` (images go to `cache_root/cacoo`).
    #[must_use]
    pub fn new(cache_root: impl AsRef<Path>) -> Self {
        Self {
            dir: cache_root.as_ref().join(CACHE_SUBDIR),
        }
    }

    /// Directory holding the cached images.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an image with these bytes is (or would be) stored at.
    #[must_use]
    pub fn path_for(&self, data: &[u8]) -> PathBuf {
        self.dir.join(format!("{}.png", content_digest(data)))
    }

    /// Store image bytes and return their cache path.
    ///
    /// Creates the cache directory if needed. An existing file for the same
    /// digest is left untouched.
    pub fn store(&self, data: &[u8]) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(data);
        if path.exists() {
            debug!("cacoo image already cached: {}", path.display());
            return Ok(path);
        }

        let write_err = |source| StoreError {
            path: path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(data).map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        info!("Stored cacoo image {}", path.display());
        Ok(path)
    }
}

/// Store image bytes under `cache_root/cacoo/{sha1}.png`.
///
/// Shorthand for [`ImageStore::new`] followed by [`ImageStore::store`].
pub fn store(data: &[u8], cache_root: &Path) -> Result<PathBuf, StoreError> {
    ImageStore::new(cache_root).store(data)
}

/// Lowercase hex SHA-1 of `data`.
fn content_digest(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}
