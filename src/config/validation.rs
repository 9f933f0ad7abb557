//! Configuration validation.
//!
//! # Responsibilities
//! - Validate value ranges (port must be non-zero)
//! - Check the served file exists, is a regular file and can be opened
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before the listener binds, so a bad path never reaches a live request

use std::fs::File;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("port must be between 1 and 65535, got {0}")]
    InvalidPort(u16),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validate a resolved configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.port == 0 {
        errors.push(ValidationError::InvalidPort(config.port));
    }

    if let Err(e) = check_file(config) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_file(config: &ServerConfig) -> Result<(), ValidationError> {
    let path = config.file_path();

    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ValidationError::FileNotFound(path.to_path_buf()),
        _ => ValidationError::FileUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }

    File::open(path).map_err(|e| ValidationError::FileUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
