//! End-to-end sweep tests
//!
//! Drive a full sweep through scripted runners, then hand the report to the
//! renderer and the CSV exporter the way the command-line tool does.

use std::fs;
use std::time::Duration;

use sweep_rs::harness::{
    AbsentReason, HarnessError, Metric, SweepConfig, SweepController, SweepState, Workload,
};
use sweep_rs::logging::SweepLogger;
use sweep_rs::output::export::{CsvExporter, Exporter};
use sweep_rs::output::visualization::{plot_sweep, sweep_plot_filename, RenderStatus};

mod common;
use common::{assert_points_close, cpu_output, memory_output, MissingAfter, ScriptedRunner, Step};

fn cpu_sweep(threads: Vec<u32>) -> SweepConfig {
    SweepConfig::new("Machine 1", Workload::Cpu)
        .with_threads(threads)
        .trial_duration(Duration::from_secs(1))
}

#[test]
fn test_failure_in_the_middle_keeps_the_slot() {
    let runner = ScriptedRunner::new()
        .output(1, cpu_output(1000.0))
        .at(2, Step::Fail)
        .output(3, cpu_output(1100.0));

    let mut controller = SweepController::new(runner, SweepLogger::disabled());
    let report = controller.run(&cpu_sweep(vec![1, 2, 3])).unwrap();

    assert_eq!(controller.state(), SweepState::Done);
    assert_eq!(report.len(), 3);

    let samples = report.samples();
    assert_eq!(samples[0].metric, Metric::Present(1000.0));
    assert_eq!(samples[1].threads, 2);
    assert_eq!(samples[1].metric, Metric::Absent(AbsentReason::InvocationFailed));
    assert_eq!(samples[2].metric, Metric::Present(1100.0));

    assert_points_close(&report.valid_points(), &[(1, 1000.0), (3, 1100.0)]);
}

#[test]
fn test_k_points_in_input_order() {
    let threads: Vec<u32> = vec![8, 1, 12, 4, 2];
    let mut runner = ScriptedRunner::new();
    for &t in &threads {
        runner = runner.output(t, cpu_output(t as f64 * 250.0));
    }

    let mut controller = SweepController::new(runner, SweepLogger::disabled());
    let report = controller.run(&cpu_sweep(threads.clone())).unwrap();

    let order: Vec<u32> = report.samples().iter().map(|s| s.threads).collect();
    assert_eq!(order, threads);

    let calls = controller.runner().calls();
    assert_eq!(calls.len(), threads.len());
    assert_eq!(calls[0], ["cpu", "--threads=8", "--time=1", "run"]);
}

#[test]
fn test_unparsable_output_is_absent() {
    let runner = ScriptedRunner::new()
        .output(1, "sysbench: unknown option --foo")
        .output(2, cpu_output(900.0));

    let (logger, buffer) = SweepLogger::in_memory();
    let mut controller = SweepController::new(runner, logger);
    let report = controller.run(&cpu_sweep(vec![1, 2])).unwrap();

    assert_eq!(report.samples()[0].metric, Metric::Absent(AbsentReason::PatternNotFound));
    assert_eq!(report.samples()[1].metric, Metric::Present(900.0));
    assert!(buffer.contents().contains("sysbench: unknown option --foo"));
}

#[test]
fn test_memory_sweep_arguments_and_values() {
    let runner = ScriptedRunner::new()
        .output(1, memory_output(1024.0, 512.75))
        .output(2, memory_output(2048.0, 980.5));

    let config = SweepConfig::new("Machine 1", Workload::memory("1M", "24G"))
        .with_threads(vec![1, 2])
        .trial_duration(Duration::from_secs(60));

    let mut controller = SweepController::new(runner, SweepLogger::disabled());
    let report = controller.run(&config).unwrap();

    assert_points_close(&report.valid_points(), &[(1, 512.75), (2, 980.5)]);
    assert_eq!(
        controller.runner().calls()[1],
        [
            "memory",
            "--threads=2",
            "--memory-block-size=1M",
            "--memory-total-size=24G",
            "--time=60",
            "run"
        ]
    );
}

#[test]
fn test_tool_missing_midway_aborts_without_report() {
    let mut controller = SweepController::new(MissingAfter::new(2), SweepLogger::disabled());
    let result = controller.run(&cpu_sweep(vec![1, 2, 3, 4]));

    match result {
        Err(HarnessError::Aborted { index, threads, ref source, .. }) => {
            assert_eq!(index, 2);
            assert_eq!(threads, 3);
            assert!(matches!(**source, HarnessError::ToolMissing { .. }));
        }
        other => panic!("expected Aborted, got {:?}", other),
    }

    assert_eq!(controller.state(), SweepState::Aborted);
    // No invocation after the fatal one
    assert_eq!(*controller.runner().calls.borrow(), 3);
}

#[test]
fn test_tool_missing_is_logged_as_error() {
    let runner = ScriptedRunner::new().at(1, Step::Missing);
    let (logger, buffer) = SweepLogger::in_memory();
    let mut controller = SweepController::new(runner, logger);

    let err = controller.run(&cpu_sweep(vec![1, 2])).unwrap_err();
    assert!(err.is_tool_missing());
    assert_eq!(buffer.count_level("ERROR"), 1);
    assert_eq!(controller.runner().calls().len(), 1);
}

#[test]
fn test_report_renders_only_present_points() {
    let runner = ScriptedRunner::new()
        .output(1, cpu_output(10.0))
        .at(2, Step::Fail)
        .output(3, cpu_output(30.0));

    let mut controller = SweepController::new(runner, SweepLogger::disabled());
    let report = controller.run(&cpu_sweep(vec![1, 2, 3])).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(sweep_plot_filename(&report.label, &report.workload));
    assert!(path.ends_with("machine_1_cpu_performance.png"));

    let status = plot_sweep(&report, path.to_str().unwrap(), None).unwrap();
    assert_eq!(status, RenderStatus::Rendered { points: 2 });
    assert!(path.exists());
}

#[test]
fn test_all_failed_sweep_skips_plot_but_exports_rows() {
    let runner = ScriptedRunner::new();
    let mut controller = SweepController::new(runner, SweepLogger::disabled());
    let report = controller.run(&cpu_sweep(vec![1, 2])).unwrap();
    assert_eq!(report.absent_count(), 2);

    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("all_failed.png");
    let (logger, buffer) = SweepLogger::in_memory();
    let status = logger.scope(|| plot_sweep(&report, png.to_str().unwrap(), None)).unwrap();
    assert_eq!(status, RenderStatus::Skipped);
    assert!(!png.exists());
    assert_eq!(buffer.count_level("WARN"), 1);

    let csv = dir.path().join("all_failed.csv");
    CsvExporter::default().export_sweep(&report, csv.to_str().unwrap()).unwrap();
    let content = fs::read_to_string(&csv).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["Threads,Events Per Second", "1,", "2,"]);
}
