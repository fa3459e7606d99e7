//! Configuration provider using Figment

use crate::error::{ConfigError, ConfigResult};
use crate::types::ReorderConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Prefix of environment variables read by default
pub const ENV_PREFIX: &str = "TRELLIS_";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration provider using figment
///
/// No caching is performed; every [`ConfigProvider::load`] reads the sources
/// fresh.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigProvider {
    /// Create a provider reading defaults and `TRELLIS_` environment variables
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Also read the given configuration file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Read environment variables with a different prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load, merge and validate the configuration
    pub fn load(&self) -> ConfigResult<ReorderConfig> {
        debug!("Loading reorder configuration");

        let config: ReorderConfig = self.build_figment()?.extract()?;
        config.validate()?;

        info!(
            edge_split_fraction = config.edge_split_fraction,
            max_scale = config.precision.max_scale,
            drop_guard_timeout_ms = config.drop_guard_timeout_ms,
            "Loaded reorder configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ReorderConfig::default()));

        if let Some(path) = &self.file {
            figment = figment.merge(Self::load_config_file(path)?);
        }

        trace!(prefix = %self.env_prefix, "Loading environment variables");
        Ok(figment.merge(Env::prefixed(&self.env_prefix).split("__")))
    }

    /// Load a single configuration file based on its extension
    fn load_config_file(path: &Path) -> ConfigResult<Figment> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        trace!("Loading config file: {}", path.display());
        match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Toml) => Ok(Figment::from(Toml::file(path))),
            Some(ConfigFormat::Yaml) => Ok(Figment::from(Yaml::file(path))),
            Some(ConfigFormat::Json) => Ok(Figment::from(Json::file(path))),
            None => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from defaults and the environment
pub fn load_configuration() -> ConfigResult<ReorderConfig> {
    ConfigProvider::new().load()
}
