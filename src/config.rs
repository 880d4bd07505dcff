use crate::attribute::Attribute;
use crate::cli::{Cli, VerbosityLevel};
use crate::tree::{DEFAULT_ENCODING, DEFAULT_VERSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

const CONFIG_NAMES: [&str; 4] = [
    "xml-forge.toml",
    "xml-forge.json",
    ".xml-forge.toml",
    ".xml-forge.json",
];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub document: DocumentConfig,
    pub output: OutputConfig,
}

/// XML declaration written by the renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocumentConfig {
    pub version: String,
    pub encoding: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode (errors only)
    pub quiet: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn verbosity(&self) -> VerbosityLevel {
        VerbosityLevel::from_flags(self.verbose, self.quiet)
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub async fn load_config(cli: &Cli) -> Result<Config> {
        let mut config = match &cli.config {
            Some(config_path) => Self::load_from_file(config_path).await?,
            None => Self::find_config_file().await?.unwrap_or_default(),
        };

        config = Self::apply_environment_overrides(config)?;
        config = Self::merge_with_cli(config, cli);
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub async fn load_from_file(path: &Path) -> Result<Config> {
        let content = tokio::fs::read_to_string(path).await?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub async fn find_config_file() -> Result<Option<Config>> {
        Self::find_config_file_in(Path::new("."), dirs::config_dir().as_deref()).await
    }

    /// Looks in `dir`, then in `user_config_dir/xml-forge`.
    pub async fn find_config_file_in(
        dir: &Path,
        user_config_dir: Option<&Path>,
    ) -> Result<Option<Config>> {
        let mut candidates: Vec<PathBuf> = CONFIG_NAMES.iter().map(|name| dir.join(name)).collect();
        if let Some(config_dir) = user_config_dir {
            let app_config_dir = config_dir.join("xml-forge");
            candidates.extend(CONFIG_NAMES.iter().map(|name| app_config_dir.join(name)));
        }

        for path in candidates {
            if path.exists() {
                log::debug!("Using configuration file {}", path.display());
                return Ok(Some(Self::load_from_file(&path).await?));
            }
        }
        Ok(None)
    }

    /// Apply environment variable overrides using the system environment
    pub fn apply_environment_overrides(config: Config) -> Result<Config> {
        Self::apply_environment_overrides_with(&SystemEnvProvider, config)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(version) = env.get("XML_FORGE_VERSION") {
            config.document.version = version;
        }

        if let Some(encoding) = env.get("XML_FORGE_ENCODING") {
            config.document.encoding = encoding;
        }

        if let Some(verbose) = env.get("XML_FORGE_VERBOSE") {
            config.output.verbose = verbose.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid XML_FORGE_VERBOSE value: {}", verbose))
            })?;
        }

        if let Some(quiet) = env.get("XML_FORGE_QUIET") {
            config.output.quiet = quiet.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid XML_FORGE_QUIET value: {}", quiet))
            })?;
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if let Some(version) = &cli.xml_version {
            config.document.version = version.clone();
        }
        if let Some(encoding) = &cli.encoding {
            config.document.encoding = encoding.clone();
        }

        // A flag on the command line overrides both settings
        if cli.verbose || cli.quiet {
            config.output.verbose = cli.verbose;
            config.output.quiet = cli.quiet;
        }

        config
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if !Attribute::is_valid_value(&config.document.version) {
            return Err(ConfigError::Validation(format!(
                "Invalid XML version: '{}'",
                config.document.version
            )));
        }

        if !Attribute::is_valid_value(&config.document.encoding) {
            return Err(ConfigError::Validation(format!(
                "Invalid encoding: '{}'",
                config.document.encoding
            )));
        }

        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        Ok(())
    }
}
