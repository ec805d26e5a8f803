//! `rw cacoo` subcommands.

mod info;
mod resolve;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use rw_cacoo::ConverterConfig;
use rw_config::{CliSettings, Config};

use crate::error::CliError;

use info::InfoArgs;
use resolve::ResolveArgs;

/// Cacoo subcommands.
#[derive(Subcommand)]
pub(crate) enum CacooCommand {
    /// Download diagrams into the image cache and print their local paths.
    Resolve(ResolveArgs),
    /// Show title, sheets and last modification time of a diagram.
    Info(InfoArgs),
}

impl CacooCommand {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Resolve(args) => args.execute(),
            Self::Info(args) => args.execute(),
        }
    }
}

/// Options shared by all Cacoo commands.
#[derive(Args)]
pub(crate) struct CacooOptions {
    /// Cacoo API key (overrides config).
    #[arg(long, env = "CACOO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CacooOptions {
    /// Load config with CLI overrides and build converter settings.
    ///
    /// Fails when no API key is configured.
    fn converter_config(&self, output_dir: Option<PathBuf>) -> Result<ConverterConfig, CliError> {
        let cli_settings = CliSettings {
            api_key: self.api_key.clone(),
            output_dir,
            timeout_secs: self.timeout,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let api_key = config.cacoo.require_api_key()?.to_owned();

        Ok(ConverterConfig {
            base_uri: config.cacoo.base_uri.clone(),
            api_url: config.cacoo.api_url.clone(),
            api_key,
            timeout: config.cacoo.timeout(),
            image_dir: config.images_resolved.output_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_converter_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
[cacoo]
api_key = "file-key"
timeout_secs = 10

[images]
output_dir = "html/_images"
"#,
        );
        let options = CacooOptions {
            api_key: None,
            timeout: None,
            config: Some(path),
        };

        let config = options.converter_config(None).unwrap();

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.image_dir, tmp.path().join("html/_images"));
        assert_eq!(config.base_uri, "https://cacoo.com/diagrams/");
    }

    #[test]
    fn test_converter_config_cli_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[cacoo]\napi_key = \"file-key\"\n");
        let options = CacooOptions {
            api_key: Some("cli-key".to_owned()),
            timeout: Some(3),
            config: Some(path),
        };

        let config = options
            .converter_config(Some(PathBuf::from("/tmp/images")))
            .unwrap();

        assert_eq!(config.api_key, "cli-key");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.image_dir, PathBuf::from("/tmp/images"));
    }

    #[test]
    fn test_converter_config_requires_api_key() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "");
        let options = CacooOptions {
            api_key: None,
            timeout: None,
            config: Some(path),
        };

        let err = options.converter_config(None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("cacoo.api_key"));
    }
}
