//! Store error definitions and connection options.

use std::time::Duration;

use thiserror::Error;
use url::Url;

// Re-export StoreConfig from config module to avoid duplication
pub use crate::config::schema::StoreConfig;

/// Errors that can occur while connecting to the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Host, port or password could not form a connection URL.
    #[error("Invalid store address: {0}")]
    Address(String),

    /// Connection or PING failed.
    #[error("Store error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The probe did not complete before the deadline.
    #[error("Store ping timed out after {0:?}")]
    Timeout(Duration),

    /// The caller abandoned the probe.
    #[error("Store connect cancelled")]
    Cancelled,

    /// The server answered PING with something other than PONG.
    #[error("Unexpected PING reply: {0}")]
    UnexpectedReply(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Options derived from [`StoreConfig`] for a single connect call.
///
/// `user` is deliberately absent: the configured user is not sent to the
/// server, only the password.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub password: Option<String>,
}

impl ConnectionOptions {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            db: config.db,
            password: config.password.clone(),
        }
    }

    /// `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `redis://[:password@]host:port/db`, password percent-encoded.
    pub fn url(&self) -> StoreResult<Url> {
        let raw = format!("redis://{}/{}", self.address(), self.db);
        let mut url = Url::parse(&raw).map_err(|e| StoreError::Address(format!("{raw}: {e}")))?;

        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|_| StoreError::Address(self.address()))?;
        }

        Ok(url)
    }
}

impl std::fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("address", &self.address())
            .field("db", &self.db)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_default_config() {
        let options = ConnectionOptions::from_config(&StoreConfig::default());
        assert_eq!(options.address(), "localhost:6379");
        assert_eq!(options.db, 1);
        assert!(options.password.is_none());
        assert_eq!(options.url().unwrap().as_str(), "redis://localhost:6379/1");
    }

    #[test]
    fn test_url_carries_password_not_user() {
        let config = StoreConfig {
            host: "10.0.0.5".into(),
            port: 6380,
            db: 4,
            user: "admin".into(),
            password: Some("p@ss word".into()),
            ..StoreConfig::default()
        };
        let url = ConnectionOptions::from_config(&config).url().unwrap();

        assert_eq!(url.username(), "");
        assert_eq!(url.password(), Some("p%40ss%20word"));
        assert_eq!(url.host_str(), Some("10.0.0.5"));
        assert_eq!(url.port(), Some(6380));
        assert_eq!(url.path(), "/4");
    }

    #[test]
    fn test_bad_host_is_address_error() {
        let config = StoreConfig {
            host: "bad host".into(),
            ..StoreConfig::default()
        };
        let err = ConnectionOptions::from_config(&config).url().unwrap_err();
        assert!(matches!(err, StoreError::Address(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let options = ConnectionOptions {
            host: "h".into(),
            port: 1,
            db: 0,
            password: Some("topsecret".into()),
        };
        assert!(!format!("{options:?}").contains("topsecret"));
    }
}
