//! Service bootstrap library: configured logger construction and a probed
//! key-value store connection.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::schema::AppConfig;
pub use lifecycle::{start, Services};
pub use observability::Logger;
pub use store::StoreClient;
