//! Configuration loading from disk and the environment.
//!
//! Environment variables override file values. The store password has no
//! file key and is read from `REDIS_USER_PASSWORD` only.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML file, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults and the environment only.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` resolves a variable name to its value, so callers can substitute
/// the process environment.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let logger = &mut config.logger;
    if let Some(v) = lookup("LOGGER_LEVEL") {
        logger.level = v;
    }
    if let Some(v) = lookup("LOGGER_ADD_SOURCE") {
        logger.add_source = parse_bool("LOGGER_ADD_SOURCE", v)?;
    }
    if let Some(v) = lookup("LOGGER_IS_JSON") {
        logger.is_json = parse_bool("LOGGER_IS_JSON", v)?;
    }
    if let Some(v) = lookup("LOGGER_OUT") {
        logger.out = v.into();
    }
    if let Some(v) = lookup("LOGGER_OUT_PATH") {
        logger.out_path = v;
    }
    if let Some(v) = lookup("LOGGER_SET_DEFAULT") {
        logger.set_default = parse_bool("LOGGER_SET_DEFAULT", v)?;
    }
    if let Some(v) = lookup("LOGGER_TYPE") {
        logger.handler_type = v.into();
    }

    let redis = &mut config.redis;
    if let Some(v) = lookup("REDIS_HOST") {
        redis.host = v;
    }
    if let Some(v) = lookup("REDIS_PORT") {
        redis.port = parse_num("REDIS_PORT", v)?;
    }
    if let Some(v) = lookup("REDIS_DB_NUMBER") {
        redis.db = parse_num("REDIS_DB_NUMBER", v)?;
    }
    if let Some(v) = lookup("REDIS_USER") {
        redis.user = v;
    }
    if let Some(v) = lookup("REDIS_USER_PASSWORD") {
        redis.password = Some(v);
    }
    if let Some(v) = lookup("REDIS_CONNECT_TIMEOUT_SECS") {
        redis.connect_timeout_secs = parse_num("REDIS_CONNECT_TIMEOUT_SECS", v)?;
    }

    Ok(())
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Env { key, value }),
    }
}

fn parse_num<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
