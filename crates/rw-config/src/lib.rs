//! Configuration management for RW.
//!
//! Parses `rw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `cacoo.api_key`
//! - `cacoo.api_url`
//! - `cacoo.base_uri`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Cacoo API key.
    pub api_key: Option<String>,
    /// Override image output directory.
    pub output_dir: Option<PathBuf>,
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Default image output directory, relative to the config file.
const DEFAULT_OUTPUT_DIR: &str = "_build/_images";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cacoo API configuration.
    pub cacoo: CacooConfig,
    /// Image output configuration (paths are relative strings from TOML).
    images: ImagesConfigRaw,

    /// Resolved image configuration (set after loading).
    #[serde(skip)]
    pub images_resolved: ImagesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Cacoo API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacooConfig {
    /// API key; required only by commands that talk to Cacoo.
    pub api_key: Option<String>,
    /// REST API root.
    pub api_url: String,
    /// URL prefix identifying Cacoo diagram references.
    pub base_uri: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CacooConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://cacoo.com/api/v1".to_owned(),
            base_uri: "https://cacoo.com/diagrams/".to_owned(),
            timeout_secs: 30,
        }
    }
}

impl CacooConfig {
    /// HTTP timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the API key, failing if it is missing or empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `cacoo.api_key` is not set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("cacoo.api_key is required".to_owned()))?;
        require_non_empty(key, "cacoo.api_key")?;
        Ok(key)
    }
}

/// Raw image configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ImagesConfigRaw {
    output_dir: Option<String>,
}

/// Resolved image configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ImagesConfig {
    /// Root directory for generated images (Cacoo images go to `cacoo/`).
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`cacoo.api_key`").
        field: String,
        /// Error message (e.g., "${`CACOO_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(api_key) = &settings.api_key {
            self.cacoo.api_key = Some(api_key.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.images_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.cacoo.timeout_secs = timeout_secs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            cacoo: CacooConfig::default(),
            images: ImagesConfigRaw::default(),
            images_resolved: ImagesConfig {
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The API key is not checked here; commands that need it call
    /// [`CacooConfig::require_api_key`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.cacoo.api_url, "cacoo.api_url")?;
        require_http_url(&self.cacoo.api_url, "cacoo.api_url")?;
        require_non_empty(&self.cacoo.base_uri, "cacoo.base_uri")?;
        require_http_url(&self.cacoo.base_uri, "cacoo.base_uri")?;

        if self.cacoo.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "cacoo.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref key) = self.cacoo.api_key {
            self.cacoo.api_key = Some(expand::expand_env(key, "cacoo.api_key")?);
        }
        self.cacoo.api_url = expand::expand_env(&self.cacoo.api_url, "cacoo.api_url")?;
        self.cacoo.base_uri = expand::expand_env(&self.cacoo.base_uri, "cacoo.base_uri")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let output_dir = self
            .images
            .output_dir
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIR);
        self.images_resolved = ImagesConfig {
            output_dir: config_dir.join(output_dir),
        };
    }
}
