//! Observability subsystem: configuration-driven logger construction.
//!
//! # Data Flow
//! ```text
//! LoggingConfig
//!     → level.rs   (level name → severity threshold)
//!     → output.rs  (stdout, or wipe-and-recreate log directory)
//!     → handler.rs (pretty / discard / json / plain text)
//!     → logger.rs  (Logger, optional process-wide default)
//! ```
//!
//! # Design Decisions
//! - Built on `tracing`: every handler is a dispatcher, and code logs with
//!   the standard `tracing` macros
//! - Configuration is read once; nothing here reconfigures after startup
//! - One output stream per logger; it is never rotated or reopened

pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod output;

pub use error::LoggingError;
pub use handler::{Handler, HandlerKind, HandlerOptions};
pub use level::{map_level, Severity};
pub use logger::{default_logger, set_default, Logger};
pub use output::{OutputStream, LOG_FILE_NAME};
