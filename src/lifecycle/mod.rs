//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build logger → Connect store → Ready
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, then the store
//! - Startup is single-threaded; the default logger is installed here once

pub mod startup;

pub use startup::{start, start_from, Services, StartupError};
