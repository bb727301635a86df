//! Key-value store client with a liveness probe at connect time.
//!
//! # Responsibilities
//! - Derive connection options from configuration
//! - Open a multiplexed connection and issue a single PING
//! - Honor caller-supplied deadlines and cancellation
//!
//! No retries here; the caller decides what a failed probe means.

use std::future::Future;
use std::time::Duration;

use redis::aio::MultiplexedConnection;

use crate::store::types::{ConnectionOptions, StoreConfig, StoreError, StoreResult};

/// A connected, probed store client.
#[derive(Clone)]
pub struct StoreClient {
    client: redis::Client,
    connection: MultiplexedConnection,
    options: ConnectionOptions,
}

impl StoreClient {
    /// Connect and ping, failing if the probe has not finished within `timeout`.
    pub async fn connect(config: &StoreConfig, timeout: Duration) -> StoreResult<Self> {
        match Self::connect_until(config, tokio::time::sleep(timeout)).await {
            Err(StoreError::Cancelled) => Err(StoreError::Timeout(timeout)),
            other => other,
        }
    }

    /// Connect and ping, abandoning the probe when `cancel` completes first.
    pub async fn connect_until<F>(config: &StoreConfig, cancel: F) -> StoreResult<Self>
    where
        F: Future<Output = ()>,
    {
        let options = ConnectionOptions::from_config(config);
        if !config.user.is_empty() {
            tracing::debug!(user = %config.user, "Store user configured but not sent");
        }

        let client = redis::Client::open(options.url()?.as_str())?;

        tokio::select! {
            result = Self::probe(&client) => {
                let connection = result?;
                tracing::info!(
                    address = %options.address(),
                    db = options.db,
                    "Store connection established"
                );
                Ok(Self { client, connection, options })
            }
            _ = cancel => {
                tracing::warn!(address = %options.address(), "Store connect abandoned");
                Err(StoreError::Cancelled)
            }
        }
    }

    async fn probe(client: &redis::Client) -> StoreResult<MultiplexedConnection> {
        let mut connection = client.get_multiplexed_async_connection().await?;
        ping(&mut connection).await?;
        Ok(connection)
    }

    /// Issue another PING over the existing connection.
    pub async fn ping(&self) -> StoreResult<()> {
        let mut connection = self.connection.clone();
        ping(&mut connection).await
    }

    /// A handle to the shared multiplexed connection.
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Get the underlying client.
    pub fn client(&self) -> &redis::Client {
        &self.client
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("options", &self.options)
            .finish()
    }
}

async fn ping(connection: &mut MultiplexedConnection) -> StoreResult<()> {
    let reply: String = redis::cmd("PING").query_async(connection).await?;
    if reply != "PONG" {
        return Err(StoreError::UnexpectedReply(reply));
    }
    Ok(())
}
