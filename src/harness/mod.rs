//! Benchmark sweep-and-parse harness
//!
//! # Core Concepts
//!
//! The harness is three layers, leaf-first:
//!
//! 1. **Runner** (`runner`) - executes the benchmark tool once
//!    - `Runner` trait: seam for scripted runners in tests
//!    - `ProcessRunner`: real child process (`sysbench` by default)
//!
//! 2. **Extractor** (`extractor`) - pulls one number out of free text
//!    - `MetricKind`: which pattern to apply
//!    - `Metric`: `Present(value)` or `Absent(reason)`
//!
//! 3. **Sweep Controller** (`sweep`) - iterates the thread range
//!    - `SweepConfig`: what to sweep
//!    - `SweepController`: runs it, logs it
//!    - `SweepReport`: ordered samples, one per point
//!
//! # Workflow
//!
//! ```text
//! SweepConfig ──► InvocationSpec ──► Runner ──► RunOutcome ──► extract ──► Sample
//!                   (per point)                                             │
//!                                                        SweepReport ◄──────┘
//! ```
//!
//! # Failure policy
//!
//! Only a missing executable stops a sweep ([`HarnessError::Aborted`]).
//! Non-zero exits, launch errors and unparsable output become
//! [`Metric::Absent`] samples and the sweep moves on.

pub mod error;
pub mod extractor;
pub mod invocation;
pub mod profile;
pub mod runner;
pub mod sweep;

pub use error::HarnessError;
pub use extractor::{extract, AbsentReason, Metric, MetricKind};
pub use invocation::{InvocationSpec, Workload};
pub use profile::MachineProfile;
pub use runner::{ProcessRunner, RunFailure, RunOutcome, Runner, DEFAULT_PROGRAM};
pub use sweep::{Sample, SweepConfig, SweepController, SweepReport, SweepState};
