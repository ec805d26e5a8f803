//! Cacoo diagram image resolution for RW.
//!
//! Documentation sources reference Cacoo diagrams by their public URL
//! (`https://cacoo.com/diagrams/<id>`, optionally with a `#sheet` fragment).
//! This crate turns such references into locally cached PNG files:
//!
//! - [`DiagramId`] recognises Cacoo URLs and derives the identifiers the two
//!   Cacoo API endpoints expect
//! - [`CacooClient`] fetches diagram metadata and rendered images over HTTP
//! - [`ImageStore`] writes images into a content-addressed directory
//! - [`CacooImageConverter`] ties the steps together and rewrites an
//!   [`ImageReference`] in place, reporting through an [`ImageHost`]
//!
//! Failures never abort a build. A reference that cannot be resolved keeps
//! its remote URL and the host receives one warning for it.
//!
//! # Example
//!
//! ```ignore
//! use rw_cacoo::{CacooImageConverter, ConverterConfig, ImageReference, ImageRegistry};
//!
//! let config = ConverterConfig {
//!     api_key: "secret".to_owned(),
//!     image_dir: "_build/_images".into(),
//!     ..ConverterConfig::default()
//! };
//! let converter = CacooImageConverter::new(&config);
//!
//! let mut reference = ImageReference::new("https://cacoo.com/diagrams/ABCD1234#sheet2");
//! let mut registry = ImageRegistry::default();
//! if converter.resolve(&mut reference, &mut registry).is_success() {
//!     println!("cached at {}", reference.uri);
//! }
//! ```

mod client;
mod consts;
mod converter;
mod diagram_id;
mod error;
mod host;
mod reference;
mod store;

pub use client::{CacooClient, DiagramInfo, DiagramSource, SheetInfo, parse_updated};
pub use consts::{DEFAULT_API_URL, DEFAULT_BASE_URI, DEFAULT_TIMEOUT};
pub use converter::{CacooImageConverter, ConverterConfig, Resolution};
pub use diagram_id::{DiagramId, matches, to_diagram_id, to_fetch_id, to_metadata_id};
pub use error::{ConvertError, FetchError, StoreError};
pub use host::{ImageHost, ImageRegistry};
pub use reference::{ImageReference, PNG_MIME, WILDCARD};
pub use store::{CACHE_SUBDIR, ImageStore, store};
