//! Scripted runners for driving sweeps without the real tool
//!
//! Each runner answers from a fixed script keyed by thread count, so a test
//! can place a failure or a garbled report at an exact point of the sweep.

use std::cell::RefCell;
use std::collections::HashMap;

use sweep_rs::harness::{HarnessError, InvocationSpec, RunFailure, RunOutcome, Runner};

use super::test_helpers::threads_of;

// =================================================================================================
// Scripted Runner
// =================================================================================================

/// What the tool does at one point
#[derive(Clone, Debug)]
pub enum Step {
    /// Exit 0 with this report
    Output(String),

    /// Exit non-zero
    Fail,

    /// Executable not found
    Missing,
}

/// Replays a script; unscripted points fail with a non-zero exit
pub struct ScriptedRunner {
    script: HashMap<u32, Step>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            script: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Builder pattern: behaviour at `threads`
    pub fn at(mut self, threads: u32, step: Step) -> Self {
        self.script.insert(threads, step);
        self
    }

    /// Builder pattern: successful report at `threads`
    pub fn output(self, threads: u32, text: impl Into<String>) -> Self {
        self.at(threads, Step::Output(text.into()))
    }

    /// Arguments of every invocation, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl Runner for ScriptedRunner {
    fn program(&self) -> &str {
        "scripted"
    }

    fn run(&self, spec: &InvocationSpec) -> Result<RunOutcome, HarnessError> {
        self.calls.borrow_mut().push(spec.args().to_vec());

        let threads = threads_of(spec);
        match self.script.get(&threads) {
            Some(Step::Output(text)) => Ok(RunOutcome::Completed(text.clone())),
            Some(Step::Missing) => Err(HarnessError::ToolMissing {
                program: self.program().to_string(),
            }),
            Some(Step::Fail) | None => Ok(RunOutcome::Failed(RunFailure::NonZeroExit {
                code: Some(1),
                stdout: String::new(),
                stderr: "FATAL: scripted failure".to_string(),
            })),
        }
    }
}

// =================================================================================================
// Tool disappearing mid-sweep
// =================================================================================================

/// Answers `events per second: 100 * threads` for the first `k` calls, then
/// reports the tool missing
pub struct MissingAfter {
    remaining: RefCell<usize>,
    pub calls: RefCell<usize>,
}

impl MissingAfter {
    pub fn new(k: usize) -> Self {
        Self {
            remaining: RefCell::new(k),
            calls: RefCell::new(0),
        }
    }
}

impl Runner for MissingAfter {
    fn program(&self) -> &str {
        "vanishing"
    }

    fn run(&self, spec: &InvocationSpec) -> Result<RunOutcome, HarnessError> {
        *self.calls.borrow_mut() += 1;

        let mut remaining = self.remaining.borrow_mut();
        if *remaining == 0 {
            return Err(HarnessError::ToolMissing {
                program: self.program().to_string(),
            });
        }
        *remaining -= 1;

        let threads = threads_of(spec);
        Ok(RunOutcome::Completed(format!(
            "events per second: {:.2}",
            100.0 * threads as f64
        )))
    }
}
