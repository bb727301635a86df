//! Logger construction and the process-wide default slot.
//!
//! # Data Flow
//! ```text
//! LoggingConfig
//!     → level::map_level      (severity threshold)
//!     → output::resolve       (stdout or fresh log file)
//!     → handler::build        (pretty / discard / json / text)
//!     → Logger
//!     → set_default           (optional, once per process)
//! ```
//!
//! # Design Decisions
//! - Construction has no error return; an unusable sink ends the process
//! - The default slot is write-once; a second install is refused
//! - Installing also sets the `tracing` global dispatcher so the standard
//!   macros reach the default logger from any thread

use std::sync::OnceLock;

use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::MakeWriter;

use crate::config::schema::LoggingConfig;
use crate::observability::error::LoggingError;
use crate::observability::handler::{self, Handler, HandlerKind, HandlerOptions};
use crate::observability::level::{map_level, Severity};
use crate::observability::output;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// A configured logging pipeline.
///
/// Two loggers are equal when they were built with the same handler kind
/// and options, whatever stream they write to.
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Handler,
}

impl Logger {
    /// Build a logger from configuration, installing it as the default when
    /// `set_default` is on.
    pub fn new(config: &LoggingConfig) -> Logger {
        let severity = map_level(&config.level);
        let stream = output::resolve(config);
        let options = HandlerOptions::new(severity, config.add_source);
        let kind = HandlerKind::resolve(config.handler_type, config.is_json);

        let logger = Logger::with_writer(kind, stream, options);

        if config.set_default {
            if let Err(e) = set_default(logger.clone()) {
                report_refused_install(&e);
            }
        }

        logger
    }

    /// Build a logger over an arbitrary writer.
    pub fn with_writer<W>(kind: HandlerKind, writer: W, options: HandlerOptions) -> Logger
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Logger::from_handler(handler::build(kind, writer, options))
    }

    pub fn from_handler(handler: Handler) -> Logger {
        Logger { handler }
    }

    /// Run `f` with this logger as the current thread's dispatcher.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(self.handler.dispatch(), f)
    }

    pub fn dispatch(&self) -> &Dispatch {
        self.handler.dispatch()
    }

    pub fn kind(&self) -> HandlerKind {
        self.handler.kind()
    }

    pub fn options(&self) -> HandlerOptions {
        self.handler.options()
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: &Level) -> bool {
        self.kind() != HandlerKind::Discard && self.options().severity.admits(level)
    }

    pub fn severity(&self) -> Severity {
        self.options().severity
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.options() == other.options()
    }
}

/// Install `logger` as the process-wide default.
///
/// Intended to run once during single-threaded startup. Fails if a default
/// was already installed here or a global `tracing` dispatcher exists.
pub fn set_default(logger: Logger) -> Result<(), LoggingError> {
    if DEFAULT_LOGGER.get().is_some() {
        return Err(LoggingError::DefaultAlreadySet);
    }

    tracing::dispatcher::set_global_default(logger.dispatch().clone())
        .map_err(|_| LoggingError::DefaultAlreadySet)?;

    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| LoggingError::DefaultAlreadySet)
}

/// Tell someone a default was already in place. The installed default hears
/// it if it listens at warn; otherwise stderr does.
fn report_refused_install(err: &LoggingError) {
    match default_logger() {
        Some(installed) if installed.enabled(&Level::WARN) => installed.in_scope(|| {
            tracing::warn!(error = %err, "Logger built but not installed as default")
        }),
        _ => eprintln!("warning: logger built but not installed as default: {err}"),
    }
}

/// The logger installed by [`set_default`], if any.
pub fn default_logger() -> Option<&'static Logger> {
    DEFAULT_LOGGER.get()
}
