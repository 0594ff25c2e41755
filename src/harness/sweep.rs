//! Sweep controller
//!
//! Runs one invocation per configured thread count, strictly in order, and
//! collects one [`Sample`] per point.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──► Running{0} ──► Running{1} ──► ... ──► Done
//!                 │               │
//!                 └───────────────┴──► Aborted   (tool missing)
//! ```
//!
//! A completed sweep always returns exactly one sample per configured point,
//! in configuration order. A failed point is kept with an absent metric so that
//! downstream plots stay aligned on the x-axis. Only the tool-missing condition
//! aborts, and an aborted sweep returns no samples at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use sweep_rs::harness::{ProcessRunner, SweepConfig, SweepController, Workload};
//! use sweep_rs::logging::SweepLogger;
//!
//! let config = SweepConfig::new("Machine 1", Workload::Cpu)
//!     .threads_up_to(12)
//!     .trial_duration(Duration::from_secs(60));
//!
//! let mut controller = SweepController::new(ProcessRunner::default(), SweepLogger::console());
//! let report = controller.run(&config)?;
//! println!("{} samples", report.len());
//! ```

use std::time::Duration;
use tracing::{error, info, warn};

use super::error::HarnessError;
use super::extractor::{extract, Metric, MetricKind};
use super::invocation::{InvocationSpec, Workload};
use super::runner::Runner;
use crate::logging::SweepLogger;

// =================================================================================================
// Configuration
// =================================================================================================

/// Parameters of one sweep
#[derive(Clone, Debug, PartialEq)]
pub struct SweepConfig {
    /// Human label of the machine or configuration (e.g. "Machine 1")
    pub label: String,

    /// Workload, which also fixes the extracted metric
    pub workload: Workload,

    /// Thread counts, in the order they are run and plotted
    pub threads: Vec<u32>,

    /// Duration of each trial, passed to the tool as `--time`
    pub trial_duration: Duration,
}

impl SweepConfig {
    /// Sweep over 1..=12 threads with 60 s trials
    pub fn new(label: impl Into<String>, workload: Workload) -> Self {
        Self {
            label: label.into(),
            workload,
            threads: (1..=12).collect(),
            trial_duration: Duration::from_secs(60),
        }
    }

    /// Builder pattern: thread counts `1..=max_threads`
    pub fn threads_up_to(mut self, max_threads: u32) -> Self {
        self.threads = (1..=max_threads).collect();
        self
    }

    /// Builder pattern: explicit thread counts
    pub fn with_threads(mut self, threads: Vec<u32>) -> Self {
        self.threads = threads;
        self
    }

    /// Builder pattern: trial duration
    pub fn trial_duration(mut self, duration: Duration) -> Self {
        self.trial_duration = duration;
        self
    }

    pub fn metric_kind(&self) -> MetricKind {
        self.workload.metric_kind()
    }

    /// Reject configurations that cannot produce a meaningful sweep
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.label.trim().is_empty() {
            return Err(HarnessError::InvalidConfig("label must not be empty".to_string()));
        }
        if self.threads.is_empty() {
            return Err(HarnessError::InvalidConfig("thread range is empty".to_string()));
        }
        if self.threads.contains(&0) {
            return Err(HarnessError::InvalidConfig("thread counts must be at least 1".to_string()));
        }
        if self.trial_duration.as_secs() == 0 {
            return Err(HarnessError::InvalidConfig(
                "trial duration must be at least one second".to_string(),
            ));
        }
        if let Workload::Memory { block_size, total_size } = &self.workload {
            if block_size.trim().is_empty() || total_size.trim().is_empty() {
                return Err(HarnessError::InvalidConfig(
                    "memory block and total sizes must be set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Samples and report
// =================================================================================================

/// One sweep point: the thread count and what was measured there
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub threads: u32,
    pub metric: Metric,
}

impl Sample {
    pub fn new(threads: u32, metric: Metric) -> Self {
        Self { threads, metric }
    }

    /// `(threads, value)` when the metric is present
    pub fn point(&self) -> Option<(u32, f64)> {
        self.metric.value().map(|v| (self.threads, v))
    }
}

/// Complete, ordered result of a sweep
#[derive(Clone, Debug, PartialEq)]
pub struct SweepReport {
    pub label: String,
    pub workload: Workload,
    pub trial_duration: Duration,
    samples: Vec<Sample>,
}

impl SweepReport {
    /// Build a report from already-collected samples (e.g. re-loaded results)
    pub fn new(
        label: impl Into<String>,
        workload: Workload,
        trial_duration: Duration,
        samples: Vec<Sample>,
    ) -> Self {
        Self {
            label: label.into(),
            workload,
            trial_duration,
            samples,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn metric_kind(&self) -> MetricKind {
        self.workload.metric_kind()
    }

    /// Present samples only, in sweep order
    pub fn valid_points(&self) -> Vec<(u32, f64)> {
        self.samples.iter().filter_map(Sample::point).collect()
    }

    /// Number of samples with an absent metric
    pub fn absent_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.metric.is_present()).count()
    }
}

// =================================================================================================
// Controller
// =================================================================================================

/// Where the controller is in its current (or last) sweep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepState {
    Pending,
    Running { index: usize },
    Done,
    Aborted,
}

/// Drives sweeps through a [`Runner`], logging into its own [`SweepLogger`]
pub struct SweepController<R: Runner> {
    runner: R,
    logger: SweepLogger,
    state: SweepState,
}

impl<R: Runner> SweepController<R> {
    pub fn new(runner: R, logger: SweepLogger) -> Self {
        Self {
            runner,
            logger,
            state: SweepState::Pending,
        }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn logger(&self) -> &SweepLogger {
        &self.logger
    }

    /// Run every point of `config` in order
    ///
    /// # Errors
    ///
    /// - [`HarnessError::InvalidConfig`] before any invocation
    /// - [`HarnessError::Aborted`] when the runner reports the tool missing;
    ///   samples gathered so far are discarded
    pub fn run(&mut self, config: &SweepConfig) -> Result<SweepReport, HarnessError> {
        config.validate()?;
        let logger = self.logger.clone();
        logger.scope(|| self.run_points(config))
    }

    fn run_points(&mut self, config: &SweepConfig) -> Result<SweepReport, HarnessError> {
        self.state = SweepState::Pending;
        let kind = config.metric_kind();
        let mut samples = Vec::with_capacity(config.threads.len());

        info!(
            "===== Starting {} sweep '{}': {} point(s), time={}s =====",
            config.workload,
            config.label,
            config.threads.len(),
            config.trial_duration.as_secs()
        );

        for (index, &threads) in config.threads.iter().enumerate() {
            self.state = SweepState::Running { index };
            info!("--- {} test: {} thread(s) ---", config.workload, threads);

            let spec = InvocationSpec::for_point(&config.workload, threads, config.trial_duration);

            let outcome = match self.runner.run(&spec) {
                Ok(outcome) => outcome,
                Err(source) => {
                    self.state = SweepState::Aborted;
                    error!(
                        "Sweep '{}' aborted at {} thread(s): {}",
                        config.label, threads, source
                    );
                    return Err(HarnessError::Aborted {
                        label: config.label.clone(),
                        index,
                        threads,
                        source: Box::new(source),
                    });
                }
            };

            let metric = extract(outcome.output(), kind);
            match &metric {
                Metric::Present(value) => info!(
                    "  Result {} ({} threads): {:.2} {}",
                    config.workload,
                    threads,
                    value,
                    kind.unit()
                ),
                Metric::Absent(reason) => warn!(
                    "  Result {} ({} threads): failed or not parsed ({})",
                    config.workload, threads, reason
                ),
            }

            samples.push(Sample::new(threads, metric));
        }

        self.state = SweepState::Done;
        info!(
            "===== {} sweep '{}' completed: {} sample(s), {} absent =====",
            config.workload,
            config.label,
            samples.len(),
            samples.iter().filter(|s: &&Sample| !s.metric.is_present()).count()
        );

        Ok(SweepReport::new(
            config.label.clone(),
            config.workload.clone(),
            config.trial_duration,
            samples,
        ))
    }
}
