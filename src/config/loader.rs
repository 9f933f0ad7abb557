//! Configuration loading from disk and command-line overrides.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ConfigOverrides, FileConfig, ServerConfig};
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no file to serve: pass --file or set `file` in the config file")]
    MissingFile,

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML config file.
pub fn read_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the final configuration from an optional file plus overrides.
///
/// Only merges: semantic checks run in `lifecycle::start`, right before bind.
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ServerConfig, ConfigError> {
    let file = match path {
        Some(p) => read_config_file(p)?,
        None => FileConfig::default(),
    };

    file.merge(overrides).ok_or(ConfigError::MissingFile)
}
