use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::git::operation::Operation;
use crate::git::options::{DefaultOptions, OptionOverlay};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    /// Default options per operation, keyed by operation name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, DefaultOptions>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    pub binary: PathBuf,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AuditConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("gitfacade"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;

        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            git: GitConfig::default(),
            audit: AuditConfig::default(),
            defaults: BTreeMap::new(),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.git.binary.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "git.binary must not be empty".to_string(),
            ));
        }

        if self.audit.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "audit.path must not be empty when set".to_string(),
            ));
        }

        for name in self.defaults.keys() {
            if Operation::from_name(name).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "Unknown operation in [defaults]: {}",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Build the option overlay declared under `[defaults]`
    pub fn overlay(&self) -> Result<OptionOverlay, ConfigError> {
        self.defaults
            .iter()
            .map(|(name, options)| {
                Operation::from_name(name)
                    .map(|op| (op, options.clone()))
                    .ok_or_else(|| {
                        let detail = format!("Unknown operation in [defaults]: {}", name);
                        ConfigError::InvalidValue(detail)
                    })
            })
            .collect()
    }

    /// Set the defaults for `operation`, replacing any previous set
    pub fn set_defaults(&mut self, operation: Operation, options: DefaultOptions) {
        self.defaults.insert(operation.name().to_string(), options);
    }
}
