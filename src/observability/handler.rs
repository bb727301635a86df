//! Handler construction.
//!
//! # Variants
//! ```text
//! Pretty              → multi-line, colorized, human oriented
//! Discard             → drops every record, never touches the stream
//! Default { json }    → JSON object per line, or plain text per line
//! ```
//!
//! # Design Decisions
//! - Handler type dominates the JSON flag; the flag only picks the encoding
//!   of the default handler
//! - Every handler is a `tracing` dispatcher, so the standard macros drive it
//! - Source annotation adds file, line and target (module path)

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::schema::HandlerType;
use crate::observability::level::Severity;

/// Resolved handler variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Pretty,
    Discard,
    Default { json: bool },
}

impl HandlerKind {
    /// Combine the configured type with the JSON flag.
    pub fn resolve(handler_type: HandlerType, is_json: bool) -> Self {
        match handler_type {
            HandlerType::Pretty => HandlerKind::Pretty,
            HandlerType::Discard => HandlerKind::Discard,
            HandlerType::Default => HandlerKind::Default { json: is_json },
        }
    }
}

/// Options every non-discarding handler honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Records below this are dropped.
    pub severity: Severity,
    /// Attach call-site information to each record.
    pub add_source: bool,
}

impl HandlerOptions {
    pub fn new(severity: Severity, add_source: bool) -> Self {
        Self {
            severity,
            add_source,
        }
    }
}

/// A built handler, ready to be wrapped in a [`Logger`](super::Logger).
#[derive(Debug, Clone)]
pub struct Handler {
    dispatch: Dispatch,
    kind: HandlerKind,
    options: HandlerOptions,
}

impl Handler {
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    pub fn options(&self) -> HandlerOptions {
        self.options
    }
}

/// Build the handler for `kind`, writing to `writer`.
pub fn build<W>(kind: HandlerKind, writer: W, options: HandlerOptions) -> Handler
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let max_level = options.severity.level_filter();
    let source = options.add_source;

    let dispatch = match kind {
        HandlerKind::Pretty => Dispatch::new(
            tracing_subscriber::fmt()
                .pretty()
                .with_ansi(true)
                .with_writer(writer)
                .with_max_level(max_level)
                .with_file(source)
                .with_line_number(source)
                .with_target(source)
                .finish(),
        ),
        HandlerKind::Discard => Dispatch::none(),
        HandlerKind::Default { json: true } => Dispatch::new(
            tracing_subscriber::fmt()
                .json()
                .with_writer(writer)
                .with_max_level(max_level)
                .with_file(source)
                .with_line_number(source)
                .with_target(source)
                .finish(),
        ),
        HandlerKind::Default { json: false } => Dispatch::new(
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(writer)
                .with_max_level(max_level)
                .with_file(source)
                .with_line_number(source)
                .with_target(source)
                .finish(),
        ),
    };

    Handler {
        dispatch,
        kind,
        options,
    }
}
