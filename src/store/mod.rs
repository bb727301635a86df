//! Key-value store connector.
//!
//! # Data Flow
//! ```text
//! StoreConfig (host, port, db, user, password from env)
//!     → types.rs  (ConnectionOptions: address, db, password)
//!     → client.rs (connect, single PING bound to deadline/cancel)
//!     → StoreClient, or the underlying error
//! ```
//!
//! # Security Constraints
//! - Password ONLY from `REDIS_USER_PASSWORD`
//! - Never log the password; Debug output redacts it
//! - The configured user is accepted but not sent to the server

pub mod client;
pub mod types;

pub use client::StoreClient;
pub use types::{ConnectionOptions, StoreConfig, StoreError, StoreResult};
