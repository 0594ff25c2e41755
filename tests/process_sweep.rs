//! Sweeps driven by real child processes
//!
//! Small shell scripts stand in for the benchmark tool so the process runner,
//! the extractor and the controller are exercised together.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sweep_rs::harness::{AbsentReason, Metric, ProcessRunner, SweepConfig, SweepController, SweepState, Workload};
use sweep_rs::logging::SweepLogger;

mod common;
use common::assert_points_close;

/// Fake tool: reports `threads * 1000` events per second, exits 3 on two threads
const FAKE_TOOL: &str = r#"#!/bin/sh
n=0
for arg in "$@"; do
  case "$arg" in
    --threads=2) echo "fatal: cannot start 2 threads" >&2; exit 3 ;;
    --threads=*) n="${arg#--threads=}" ;;
  esac
done
echo "CPU speed:"
echo "    events per second: ${n}000.00"
"#;

fn write_tool(dir: &Path, name: &str, body: &str, mode: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    path
}

fn cpu_sweep(threads: Vec<u32>) -> SweepConfig {
    SweepConfig::new("Machine 1", Workload::Cpu)
        .with_threads(threads)
        .trial_duration(Duration::from_secs(1))
}

#[test]
fn test_nonzero_exit_midway_keeps_sweeping() {
    let dir = tempfile::tempdir().unwrap();
    let tool = write_tool(dir.path(), "fake-bench", FAKE_TOOL, 0o755);

    let (logger, buffer) = SweepLogger::in_memory();
    let mut controller = SweepController::new(ProcessRunner::new(tool.to_str().unwrap()), logger);
    let report = controller.run(&cpu_sweep(vec![1, 2, 3])).unwrap();

    assert_eq!(controller.state(), SweepState::Done);
    assert_eq!(report.len(), 3);
    assert_eq!(report.samples()[1].metric, Metric::Absent(AbsentReason::InvocationFailed));
    assert_points_close(&report.valid_points(), &[(1, 1000.0), (3, 3000.0)]);

    let log = buffer.contents();
    assert!(log.contains("failed with code 3"));
    assert!(log.contains("cannot start 2 threads"));
}

#[test]
fn test_unexecutable_tool_yields_absent_samples() {
    let dir = tempfile::tempdir().unwrap();
    let tool = write_tool(dir.path(), "fake-bench", FAKE_TOOL, 0o644);

    let mut controller = SweepController::new(ProcessRunner::new(tool.to_str().unwrap()), SweepLogger::disabled());
    let report = controller.run(&cpu_sweep(vec![1, 2])).unwrap();

    assert_eq!(controller.state(), SweepState::Done);
    assert_eq!(report.len(), 2);
    assert!(report
        .samples()
        .iter()
        .all(|s| s.metric == Metric::Absent(AbsentReason::InvocationFailed)));
}
