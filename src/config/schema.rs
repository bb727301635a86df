//! The `[logger]` and `[redis]` tables and their defaults.
//!
//! Unknown `out` and `type` values fall back instead of failing the load;
//! the store password has no file key.

use serde::{Deserialize, Serialize};

/// Directory used for file output when `out_path` is empty.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logger construction settings.
    pub logger: LoggingConfig,

    /// Key-value store connection settings.
    pub redis: StoreConfig,
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level name (debug, info, warn, error). Anything else means info.
    pub level: String,

    /// Attach call-site file, line and module to each record.
    pub add_source: bool,

    /// JSON instead of plain text. Only consulted by the default handler.
    pub is_json: bool,

    /// Where records go.
    pub out: OutputMode,

    /// Log directory for file output. Empty means [`DEFAULT_LOG_DIR`].
    pub out_path: String,

    /// Install the built logger as the process-wide default.
    pub set_default: bool,

    /// Handler variant.
    #[serde(rename = "type")]
    pub handler_type: HandlerType,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            add_source: true,
            is_json: true,
            out: OutputMode::Stdout,
            out_path: String::new(),
            set_default: true,
            handler_type: HandlerType::Default,
        }
    }
}

impl LoggingConfig {
    /// Directory that file output writes into.
    pub fn log_dir(&self) -> &str {
        if self.out_path.is_empty() {
            DEFAULT_LOG_DIR
        } else {
            &self.out_path
        }
    }
}

/// Output destination for log records.
///
/// Only `"file"` selects file output; every other value means stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum OutputMode {
    #[default]
    Stdout,
    File,
}

impl From<String> for OutputMode {
    fn from(value: String) -> Self {
        OutputMode::from(value.as_str())
    }
}

impl From<&str> for OutputMode {
    fn from(value: &str) -> Self {
        match value {
            "file" => OutputMode::File,
            _ => OutputMode::Stdout,
        }
    }
}

impl From<OutputMode> for String {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Stdout => "stdout".to_string(),
            OutputMode::File => "file".to_string(),
        }
    }
}

/// Configured handler type.
///
/// Unknown names fall back to `Default` rather than failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum HandlerType {
    #[default]
    Default,
    Pretty,
    Discard,
}

impl From<String> for HandlerType {
    fn from(value: String) -> Self {
        HandlerType::from(value.as_str())
    }
}

impl From<&str> for HandlerType {
    fn from(value: &str) -> Self {
        match value {
            "pretty" => HandlerType::Pretty,
            "discard" => HandlerType::Discard,
            _ => HandlerType::Default,
        }
    }
}

impl From<HandlerType> for String {
    fn from(kind: HandlerType) -> Self {
        match kind {
            HandlerType::Default => "default".to_string(),
            HandlerType::Pretty => "pretty".to_string(),
            HandlerType::Discard => "discard".to_string(),
        }
    }
}

/// Key-value store connection configuration.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Store hostname.
    pub host: String,

    /// Store port.
    pub port: u16,

    /// Logical database index.
    pub db: i64,

    /// Accepted for completeness; not sent to the server.
    pub user: String,

    /// Only ever read from `REDIS_USER_PASSWORD`.
    #[serde(skip)]
    pub password: Option<String>,

    /// Deadline for the connect-and-ping probe at startup.
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 1,
            user: "admin".to_string(),
            password: None,
            connect_timeout_secs: 5,
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
