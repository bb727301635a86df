//! Output stream resolution.
//!
//! # Responsibilities
//! - Pick stdout or a managed log file from configuration
//! - Wipe and recreate the log directory for file output
//! - Expose the stream as a `MakeWriter` for the handlers
//!
//! # Design Decisions
//! - File output starts empty on every process start (no rotation)
//! - A sink that cannot be prepared terminates the process
//! - One write per record, so records never interleave mid-line

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::config::schema::{LoggingConfig, OutputMode};
use crate::observability::error::LoggingError;

/// Name of the log file created inside the log directory.
pub const LOG_FILE_NAME: &str = "all.log";

/// Destination for formatted records.
#[derive(Debug, Clone)]
pub enum OutputStream {
    /// Process stdout. Shared, never closed here.
    Stdout,
    /// Log file owned by the handler for the life of the process.
    File(Arc<File>),
}

impl OutputStream {
    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputStream::Stdout)
    }
}

/// Writer handed out per record.
pub enum OutputWriter<'a> {
    Stdout(io::StdoutLock<'static>),
    File(&'a File),
}

impl Write for OutputWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputWriter::Stdout(lock) => lock.write(buf),
            OutputWriter::File(file) => file.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(lock) => lock.write_all(buf),
            OutputWriter::File(file) => file.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(lock) => lock.flush(),
            OutputWriter::File(file) => file.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for OutputStream {
    type Writer = OutputWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            OutputStream::Stdout => OutputWriter::Stdout(io::stdout().lock()),
            OutputStream::File(file) => OutputWriter::File(file.as_ref()),
        }
    }
}

/// Resolve the configured output stream.
///
/// For file output this removes the whole log directory first. Any failure
/// there is fatal and ends the process.
pub fn resolve(config: &LoggingConfig) -> OutputStream {
    match config.out {
        OutputMode::Stdout => OutputStream::Stdout,
        OutputMode::File => match prepare_log_file(Path::new(config.log_dir())) {
            Ok(file) => OutputStream::File(Arc::new(file)),
            Err(e) => fatal(&e),
        },
    }
}

/// Whether the last component of `dir` is `.` or `..`.
///
/// `Path::components` drops a trailing `.`, so this looks at the raw text.
pub fn is_dot_terminated(dir: &Path) -> bool {
    let raw = dir.as_os_str().to_string_lossy();
    let trimmed = raw.trim_end_matches(std::path::is_separator);
    let last = trimmed.rsplit(std::path::is_separator).next().unwrap_or("");
    last == "." || last == ".."
}

/// Remove `dir`, recreate it, and open a fresh `all.log` inside it.
///
/// Paths ending in `.` or `..` are refused before anything is removed.
pub fn prepare_log_file(dir: &Path) -> Result<File, LoggingError> {
    if is_dot_terminated(dir) {
        return Err(LoggingError::RemoveDir {
            path: dir.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "log directory must not end in `.` or `..`",
            ),
        });
    }

    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(LoggingError::RemoveDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(dir)
        .map_err(|source| LoggingError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(LOG_FILE_NAME);
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options
        .open(&path)
        .map_err(|source| LoggingError::OpenFile { path, source })
}

fn fatal(err: &LoggingError) -> ! {
    eprintln!("fatal: cannot prepare log output: {err}");
    std::process::exit(1)
}
