//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the logger from validated configuration
//! - Report the resolved configuration through it
//! - Connect to the store and run the liveness probe
//!
//! # Design Decisions
//! - Logger first, so store failures are logged through the configured sink
//! - Subsystems initialize in order, not concurrently
//! - A log sink that cannot be prepared is fatal; a store probe failure is
//!   returned to the caller

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::instrument::WithSubscriber;

use crate::config::{self, AppConfig, ConfigError};
use crate::observability::Logger;
use crate::store::{StoreClient, StoreError};

/// Errors that stop startup without terminating the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}

/// Everything built during startup.
#[derive(Debug, Clone)]
pub struct Services {
    pub logger: Logger,
    pub store: StoreClient,
}

/// Load configuration from `path` (or the environment alone), then [`start`].
pub async fn start_from(path: Option<&Path>) -> Result<Services, StartupError> {
    let config = match path {
        Some(path) => config::load_config(path)?,
        None => config::load_from_env()?,
    };
    start(&config).await
}

/// Build the logger, then connect to the store.
pub async fn start(config: &AppConfig) -> Result<Services, StartupError> {
    let logger = Logger::new(&config.logger);

    logger.in_scope(|| {
        tracing::info!(
            level = %config.logger.level,
            handler = ?logger.kind(),
            out = ?config.logger.out,
            store = ?config.redis,
            "Configuration loaded"
        )
    });

    let timeout = Duration::from_secs(config.redis.connect_timeout_secs);
    // the probe's own events go through the new logger as well
    let probe = StoreClient::connect(&config.redis, timeout)
        .with_subscriber(logger.dispatch().clone());
    let store = match probe.await {
        Ok(store) => store,
        Err(e) => {
            logger.in_scope(|| tracing::error!(error = %e, "Store liveness probe failed"));
            return Err(e.into());
        }
    };

    Ok(Services { logger, store })
}
