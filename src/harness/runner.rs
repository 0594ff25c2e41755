//! Runner: one synchronous execution of the benchmark tool
//!
//! # Failure classes
//!
//! | Condition                     | Returned as                                   | Sweep   |
//! |-------------------------------|-----------------------------------------------|---------|
//! | exit status 0                 | `Ok(RunOutcome::Completed(stdout))`           | goes on |
//! | non-zero exit                 | `Ok(RunOutcome::Failed(NonZeroExit { .. }))`  | goes on |
//! | other launch / wait error     | `Ok(RunOutcome::Failed(Unexpected(..)))`      | goes on |
//! | executable not found          | `Err(HarnessError::ToolMissing { .. })`       | aborts  |
//!
//! There is no timeout: the tool bounds itself with `--time`, and a hung tool
//! blocks the caller.

use std::io::ErrorKind;
use std::process::Command;
use tracing::{error, info};

use super::error::HarnessError;
use super::invocation::InvocationSpec;

/// Executable invoked when no other program is configured
pub const DEFAULT_PROGRAM: &str = "sysbench";

/// Why a single invocation produced no usable output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunFailure {
    /// The tool ran and exited with a non-zero status
    ///
    /// `code` is `None` when the process was terminated by a signal.
    NonZeroExit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Launching or waiting on the process failed for a reason other than
    /// a missing executable
    Unexpected(String),
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunFailure::NonZeroExit { code: Some(code), .. } => write!(f, "exited with code {}", code),
            RunFailure::NonZeroExit { code: None, .. } => write!(f, "terminated by signal"),
            RunFailure::Unexpected(msg) => write!(f, "unexpected error: {}", msg),
        }
    }
}

/// Result of a recoverable invocation: text output, or why there is none
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(String),
    Failed(RunFailure),
}

impl RunOutcome {
    /// Captured output, `None` on failure
    pub fn output(&self) -> Option<&str> {
        match self {
            RunOutcome::Completed(text) => Some(text),
            RunOutcome::Failed(_) => None,
        }
    }
}

/// Executes one invocation of the benchmark tool
///
/// The sweep controller is generic over this trait so a sweep can be driven
/// by a scripted runner in tests.
pub trait Runner {
    /// Program name, used in log lines
    fn program(&self) -> &str;

    /// Run the tool once with `spec`
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ToolMissing`] when the executable cannot be
    /// found. Every other failure is reported as [`RunOutcome::Failed`].
    fn run(&self, spec: &InvocationSpec) -> Result<RunOutcome, HarnessError>;
}

/// [`Runner`] backed by a child process
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    program: String,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Runner for ProcessRunner {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, spec: &InvocationSpec) -> Result<RunOutcome, HarnessError> {
        let command_line = spec.command_line(&self.program);
        info!("  Running: {}", command_line);

        let output = match Command::new(&self.program).args(spec.args()).output() {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("CRITICAL: command '{}' not found: {}", self.program, e);
                return Err(HarnessError::ToolMissing { program: self.program.clone() });
            }
            Err(e) => {
                error!("  ERROR: unexpected failure running {}: {}", self.program, e);
                error!("  Command: {}", command_line);
                return Ok(RunOutcome::Failed(RunFailure::Unexpected(e.to_string())));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if output.status.success() {
            return Ok(RunOutcome::Completed(stdout));
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        match output.status.code() {
            Some(code) => error!("  ERROR: {} failed with code {}.", self.program, code),
            None => error!("  ERROR: {} terminated by signal.", self.program),
        }
        error!("  Command: {}", command_line);
        error!("  Stderr:\n{}", stderr);
        error!("  Stdout:\n{}", stdout);

        Ok(RunOutcome::Failed(RunFailure::NonZeroExit {
            code: output.status.code(),
            stdout,
            stderr,
        }))
    }
}
