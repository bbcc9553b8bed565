//! Error types for the settings crate.

use std::io;
use thiserror::Error;

/// Failure to locate, read, write or parse a config file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No config directory: {0}")]
    ConfigDirectory(String),

    #[error("Config file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Could not write TOML config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Config parsed but was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A config that parsed but cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Extension other than `.json` or `.toml`.
    #[error("Unsupported config format '{0}'")]
    UnsupportedFormat(String),

    /// `key` is the dotted path of the offending field.
    #[error("{key} = {value} is out of range")]
    ValueOutOfRange { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(key: &str, value: impl ToString) -> Self {
        Self::ValueOutOfRange {
            key: key.to_owned(),
            value: value.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
