//! `rw cacoo info` command implementation.

use clap::Args;
use rw_cacoo::{CacooImageConverter, parse_updated};

use super::CacooOptions;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the cacoo info command.
#[derive(Args)]
pub(crate) struct InfoArgs {
    /// Diagram URL, e.g. `https://cacoo.com/diagrams/ABCD1234`.
    uri: String,

    #[command(flatten)]
    options: CacooOptions,
}

impl InfoArgs {
    /// Execute the info command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.options.converter_config(None)?;
        let converter = CacooImageConverter::new(&config);

        let info = converter.diagram_info(&self.uri)?.ok_or_else(|| {
            CliError::Validation(format!(
                "{} is not a Cacoo diagram URL (expected prefix {})",
                self.uri, config.base_uri
            ))
        })?;

        output.title(info.title.as_deref());
        if let Some(url) = &info.url {
            output.info(&format!("URL: {url}"));
        }
        output.info(&format!(
            "Updated: {} ({})",
            info.updated,
            parse_updated(&info.updated)?
        ));

        if !info.sheets.is_empty() {
            output.info(&format!("\nSheets ({}):", info.sheets.len()));
            for sheet in &info.sheets {
                output.sheet(&sheet.uid, sheet.name.as_deref());
            }
        }

        Ok(())
    }
}
