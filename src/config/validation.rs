//! Semantic checks on a loaded configuration.
//!
//! Checks what serde cannot: store port and database ranges, a usable
//! probe deadline, and a log directory that is safe to wipe at startup.
//! Every problem found is reported, so one failed start lists them all.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AppConfig, OutputMode};
use crate::observability::output::is_dot_terminated;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("redis.host must not be empty")]
    EmptyHost,

    #[error("redis.port must be non-zero")]
    ZeroPort,

    #[error("redis.db must be non-negative, got {0}")]
    NegativeDb(i64),

    #[error("redis.connect_timeout_secs must be non-zero")]
    ZeroConnectTimeout,

    #[error("logger.out_path {0:?} would remove the filesystem root or a parent directory")]
    RootLogDir(String),
}

/// Check every semantic constraint and collect all failures.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.redis.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.redis.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.redis.db < 0 {
        errors.push(ValidationError::NegativeDb(config.redis.db));
    }
    if config.redis.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }

    if config.logger.out == OutputMode::File {
        let dir = Path::new(config.logger.log_dir());
        let is_root = dir.has_root() && dir.parent().is_none();
        if is_root || is_dot_terminated(dir) {
            errors.push(ValidationError::RootLogDir(config.logger.out_path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
