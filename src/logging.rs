//! Log sink for sweeps
//!
//! A [`SweepLogger`] is an explicitly constructed `tracing` dispatcher. It is
//! never installed process-wide: the sweep controller enters it with
//! [`SweepLogger::scope`] for the duration of one sweep, so every `info!`,
//! `warn!` and `error!` emitted by the runner and the extractor during that
//! sweep lands in this logger's sinks and nowhere else.
//!
//! Each line carries a timestamp, the severity and the message.
//!
//! # Example
//!
//! ```rust,ignore
//! use sweep_rs::logging::SweepLogger;
//!
//! let logger = SweepLogger::builder()
//!     .console(true)
//!     .file("Machine1/benchmark_machine1_plot.log")
//!     .build()?;
//!
//! logger.scope(|| tracing::info!("--- Starting benchmarks ---"));
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::MakeWriter;

use crate::harness::HarnessError;

// =================================================================================================
// Sinks
// =================================================================================================

#[derive(Clone)]
enum Sink {
    Stdout,
    File(Arc<Mutex<File>>),
    Buffer(LogBuffer),
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "log sink lock poisoned")
}

impl Sink {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().lock().write_all(buf),
            Sink::File(file) => file.lock().map_err(|_| poisoned())?.write_all(buf),
            Sink::Buffer(buffer) => {
                buffer.inner.lock().map_err(|_| poisoned())?.extend_from_slice(buf);
                Ok(())
            }
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::File(file) => file.lock().map_err(|_| poisoned())?.flush(),
            Sink::Buffer(_) => Ok(()),
        }
    }
}

/// Writer handed to the `fmt` layer for one event; fans out to every sink
struct TeeWriter {
    sinks: Vec<Sink>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}

#[derive(Clone)]
struct TeeMakeWriter {
    sinks: Vec<Sink>,
}

impl<'a> MakeWriter<'a> for TeeMakeWriter {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter { sinks: self.sinks.clone() }
    }
}

/// In-memory log capture, shared with the logger that writes into it
#[derive(Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Everything logged so far
    pub fn contents(&self) -> String {
        self.inner
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    /// Number of log entries at `level` (`"INFO"`, `"WARN"`, `"ERROR"`)
    ///
    /// Counts entry headers only, so multi-line messages are counted once.
    pub fn count_level(&self, level: &str) -> usize {
        let marker = format!(" {} ", level);
        self.contents()
            .lines()
            .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()) && line.contains(&marker))
            .count()
    }
}

// =================================================================================================
// Logger
// =================================================================================================

/// Explicit logging handle scoped to one sweep
#[derive(Clone)]
pub struct SweepLogger {
    dispatch: Dispatch,
}

impl std::fmt::Debug for SweepLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepLogger").finish_non_exhaustive()
    }
}

impl SweepLogger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Logger writing to standard output only
    pub fn console() -> Self {
        Self::from_sinks(vec![Sink::Stdout])
    }

    /// Logger that swallows everything
    pub fn disabled() -> Self {
        Self { dispatch: Dispatch::none() }
    }

    /// Logger writing into a fresh [`LogBuffer`]
    pub fn in_memory() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        let logger = Self::from_sinks(vec![Sink::Buffer(buffer.clone())]);
        (logger, buffer)
    }

    fn from_sinks(sinks: Vec<Sink>) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(TeeMakeWriter { sinks })
            .with_ansi(false)
            .with_target(false)
            .with_max_level(Level::INFO)
            .finish();

        Self { dispatch: Dispatch::new(subscriber) }
    }

    /// Run `f` with this logger as the current `tracing` dispatcher
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

/// Builder for a console and/or file [`SweepLogger`]
#[derive(Clone, Debug)]
pub struct LoggerBuilder {
    console: bool,
    file: Option<PathBuf>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            console: true,
            file: None,
        }
    }
}

impl LoggerBuilder {
    /// Builder pattern: enable or disable standard output
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Builder pattern: also write to `path` (truncated on build)
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Open sinks and build the logger
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the log file or its directory cannot
    /// be created.
    pub fn build(self) -> Result<SweepLogger, HarnessError> {
        let mut sinks = Vec::new();

        if self.console {
            sinks.push(Sink::Stdout);
        }

        if let Some(path) = &self.file {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            sinks.push(Sink::File(Arc::new(Mutex::new(File::create(path)?))));
        }

        Ok(SweepLogger::from_sinks(sinks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{error, info, warn};

    #[test]
    fn test_in_memory_capture() {
        let (logger, buffer) = SweepLogger::in_memory();
        logger.scope(|| {
            info!("progress");
            warn!("suspicious\nsecond line");
            error!("broken");
        });

        let contents = buffer.contents();
        assert!(contents.contains("progress"));
        assert!(contents.contains("second line"));
        assert_eq!(buffer.count_level("INFO"), 1);
        assert_eq!(buffer.count_level("WARN"), 1);
        assert_eq!(buffer.count_level("ERROR"), 1);
    }

    #[test]
    fn test_nothing_logged_outside_scope() {
        let (logger, buffer) = SweepLogger::in_memory();
        info!("before");
        logger.scope(|| info!("inside"));
        info!("after");

        let contents = buffer.contents();
        assert!(contents.contains("inside"));
        assert!(!contents.contains("before"));
        assert!(!contents.contains("after"));
    }

    #[test]
    fn test_debug_is_filtered() {
        let (logger, buffer) = SweepLogger::in_memory();
        logger.scope(|| tracing::debug!("hidden"));
        assert!(!buffer.contents().contains("hidden"));
    }

    #[test]
    fn test_file_sink_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("sweep.log");

        let logger = SweepLogger::builder().console(false).file(&path).build().unwrap();
        logger.scope(|| info!("written to file"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("written to file"));
        assert!(contents.contains("INFO"));
    }

    #[test]
    fn test_disabled_logger_runs_closure() {
        let value = SweepLogger::disabled().scope(|| 42);
        assert_eq!(value, 42);
    }
}
