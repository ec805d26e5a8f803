//! Conversion of Cacoo image references into cached local files.
//!
//! [`CacooImageConverter`] is invoked by the documentation build for each
//! image reference in a document. References outside the Cacoo diagram
//! space are left alone. Matching references are downloaded, stored in the
//! content-addressed [`ImageStore`] and rewritten to the local path.
//!
//! Download or write failures produce one warning per reference through the
//! [`ImageHost`] and leave the reference untouched, so the build continues
//! with a missing image instead of aborting.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;
use tracing::debug;

use crate::client::{CacooClient, DiagramInfo, DiagramSource};
use crate::consts::{DEFAULT_API_URL, DEFAULT_BASE_URI, DEFAULT_TIMEOUT};
use crate::diagram_id::DiagramId;
use crate::error::{ConvertError, FetchError};
use crate::host::ImageHost;
use crate::reference::ImageReference;
use crate::store::ImageStore;

/// Settings for a [`CacooImageConverter`] backed by the Cacoo HTTP API.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// URL prefix identifying Cacoo references.
    pub base_uri: String,
    /// Cacoo REST API root.
    pub api_url: String,
    /// Cacoo API key.
    pub api_key: String,
    /// Image output root; images land in `{image_dir}/cacoo/`.
    pub image_dir: PathBuf,
    /// HTTP timeout per request.
    pub timeout: Duration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            api_key: String::new(),
            image_dir: PathBuf::from("_images"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Outcome of converting one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not a Cacoo reference; nothing was done.
    NotApplicable,
    /// Downloaded and rewritten to the given local path.
    Resolved(PathBuf),
    /// Conversion failed; a warning was emitted and the reference is unchanged.
    Failed,
}

impl Resolution {
    /// Whether the reference now points at a local file.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolves Cacoo image references to locally cached PNG files.
pub struct CacooImageConverter<S = CacooClient> {
    base_uri: String,
    source: S,
    store: ImageStore,
}

impl CacooImageConverter<CacooClient> {
    /// Create a converter talking to the Cacoo API.
    #[must_use]
    pub fn new(config: &ConverterConfig) -> Self {
        let client =
            CacooClient::with_options(&config.api_url, config.api_key.clone(), config.timeout);
        Self::with_source(config.base_uri.clone(), &config.image_dir, client)
    }
}

impl<S: DiagramSource> CacooImageConverter<S> {
    /// Create a converter with a custom diagram source.
    ///
    /// # Arguments
    /// * `base_uri` - URL prefix identifying Cacoo references
    /// * `image_dir` - Image output root
    /// * `source` - Where diagram images are fetched from
    #[must_use]
    pub fn with_source(
        base_uri: impl Into<String>,
        image_dir: impl AsRef<Path>,
        source: S,
    ) -> Self {
        Self {
            base_uri: base_uri.into(),
            source,
            store: ImageStore::new(image_dir),
        }
    }

    /// Diagram source used for downloads.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether `reference` belongs to the Cacoo diagram space.
    #[must_use]
    pub fn matches(&self, reference: &ImageReference) -> bool {
        crate::diagram_id::matches(&reference.uri, &self.base_uri)
    }

    /// Diagram identifier of a reference URI, if it is a Cacoo URI.
    #[must_use]
    pub fn diagram_id(&self, uri: &str) -> Option<DiagramId> {
        DiagramId::from_uri(uri, &self.base_uri)
    }

    /// Metadata of the diagram behind `uri`.
    ///
    /// Returns `Ok(None)` when `uri` is not a Cacoo URI.
    pub fn diagram_info(&self, uri: &str) -> Result<Option<DiagramInfo>, FetchError> {
        self.diagram_id(uri)
            .map(|id| self.source.fetch_metadata(id.metadata_id()))
            .transpose()
    }

    /// Last modification time (epoch seconds) of the diagram behind `uri`.
    ///
    /// Returns `Ok(None)` when `uri` is not a Cacoo URI.
    pub fn last_modified(&self, uri: &str) -> Result<Option<i64>, FetchError> {
        self.diagram_id(uri)
            .map(|id| self.source.last_modified(id.metadata_id()))
            .transpose()
    }

    /// Download and cache the image behind `reference`, then rewrite it.
    pub fn resolve(&self, reference: &mut ImageReference, host: &mut dyn ImageHost) -> Resolution {
        let Some(id) = self.diagram_id(&reference.uri) else {
            return Resolution::NotApplicable;
        };

        let result = self.download(&id.fetch_id());
        apply(reference, result.as_ref().map(String::as_str), host)
    }

    /// Resolve every reference of a build.
    ///
    /// Distinct images are downloaded in parallel, each at most once, then
    /// the references are rewritten in order. Returns one [`Resolution`] per
    /// input reference.
    pub fn resolve_all(
        &self,
        references: &mut [ImageReference],
        host: &mut dyn ImageHost,
    ) -> Vec<Resolution> {
        let ids: Vec<Option<DiagramId>> = references
            .iter()
            .map(|reference| self.diagram_id(&reference.uri))
            .collect();

        let fetch_ids: BTreeSet<String> = ids.iter().flatten().map(DiagramId::fetch_id).collect();
        debug!("Downloading {} distinct cacoo images", fetch_ids.len());

        let downloads: HashMap<String, Result<String, ConvertError>> = fetch_ids
            .into_par_iter()
            .map(|fetch_id| {
                let result = self.download(&fetch_id);
                (fetch_id, result)
            })
            .collect();

        references
            .iter_mut()
            .zip(ids)
            .map(|(reference, id)| match id {
                None => Resolution::NotApplicable,
                Some(id) => {
                    let result = &downloads[&id.fetch_id()];
                    apply(reference, result.as_ref().map(String::as_str), host)
                }
            })
            .collect()
    }

    /// Fetch an image and store it in the cache.
    ///
    /// Returns the cached path as a string, ready to be written into a
    /// reference.
    fn download(&self, fetch_id: &str) -> Result<String, ConvertError> {
        debug!("Fetching cacoo image {fetch_id}");
        let data = self.source.fetch_image(fetch_id)?;
        let path = self.store.store(&data)?;
        path.into_os_string()
            .into_string()
            .map_err(|path| ConvertError::NonUtf8Path { path: path.into() })
    }
}

/// Rewrite `reference` on success or warn on failure.
fn apply(
    reference: &mut ImageReference,
    result: Result<&str, &ConvertError>,
    host: &mut dyn ImageHost,
) -> Resolution {
    match result {
        Ok(local) => {
            let path = Path::new(local);
            host.register_image(path, &reference.uri);
            reference.set_local_png(local);
            Resolution::Resolved(path.to_path_buf())
        }
        Err(err) => {
            host.warn(&format!(
                "failed to download cacoo image: {} ({err})",
                reference.uri
            ));
            Resolution::Failed
        }
    }
}
