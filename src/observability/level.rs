//! Level names to numeric severity thresholds.
//!
//! Severities use a gap of four between named levels so intermediate
//! thresholds stay expressible: debug = -4, info = 0, warn = 4, error = 8.

use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Numeric severity. Records below a handler's threshold are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Severity(pub i32);

impl Severity {
    pub const TRACE: Severity = Severity(-8);
    pub const DEBUG: Severity = Severity(-4);
    pub const INFO: Severity = Severity(0);
    pub const WARN: Severity = Severity(4);
    pub const ERROR: Severity = Severity(8);

    /// Severity of a `tracing` level.
    pub fn of(level: &Level) -> Severity {
        match *level {
            Level::TRACE => Severity::TRACE,
            Level::DEBUG => Severity::DEBUG,
            Level::INFO => Severity::INFO,
            Level::WARN => Severity::WARN,
            Level::ERROR => Severity::ERROR,
        }
    }

    /// The most verbose filter that still drops everything below `self`.
    pub fn level_filter(self) -> LevelFilter {
        match self.0 {
            i32::MIN..=-8 => LevelFilter::TRACE,
            -7..=-4 => LevelFilter::DEBUG,
            -3..=0 => LevelFilter::INFO,
            1..=4 => LevelFilter::WARN,
            5..=8 => LevelFilter::ERROR,
            _ => LevelFilter::OFF,
        }
    }

    /// Whether a record at `level` clears this threshold.
    pub fn admits(self, level: &Level) -> bool {
        Severity::of(level) >= self
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

/// Map a configured level name to its threshold. Unknown names mean info.
pub fn map_level(name: &str) -> Severity {
    match name {
        "debug" => Severity::DEBUG,
        "info" => Severity::INFO,
        "warn" => Severity::WARN,
        "error" => Severity::ERROR,
        _ => Severity::INFO,
    }
}
