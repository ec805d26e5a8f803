//! `rw cacoo resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_cacoo::{CacooImageConverter, ImageReference, ImageRegistry, Resolution};

use super::CacooOptions;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the cacoo resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Diagram URLs, e.g. `https://cacoo.com/diagrams/ABCD1234#sheet2`.
    #[arg(required = true)]
    uris: Vec<String>,

    /// Image output root; files go to `<dir>/cacoo/` (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    options: CacooOptions,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Diagrams that fail to download are reported and skipped; only
    /// configuration problems make the command fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.options.converter_config(self.output_dir)?;

        output.info(&format!("Output: {}", config.image_dir.display()));

        let converter = CacooImageConverter::new(&config);
        let mut references: Vec<ImageReference> =
            self.uris.iter().map(ImageReference::new).collect();
        let mut registry = ImageRegistry::default();

        tracing::debug!("Resolving {} references", references.len());
        let resolutions = converter.resolve_all(&mut references, &mut registry);

        let mut resolved = 0;
        for (uri, resolution) in self.uris.iter().zip(&resolutions) {
            match resolution {
                Resolution::Resolved(path) => {
                    resolved += 1;
                    output.resolved(uri, path);
                }
                Resolution::NotApplicable => output.skipped(&format!(
                    "{uri}: not a Cacoo diagram URL (expected prefix {})",
                    config.base_uri
                )),
                Resolution::Failed => {}
            }
        }

        for warning in &registry.warnings {
            output.skipped(warning);
        }

        output.summary(resolved, self.uris.len());
        Ok(())
    }
}
