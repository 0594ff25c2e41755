//! Example: Thread sweep of one machine
//!
//! Runs the CPU and memory workloads of `sysbench` for 1..=4 threads with
//! short trials, logging to the console and `demo_sweep/sweep.log`, then
//! writes one plot and one CSV table per workload into `demo_sweep/`.
//!
//! Requires `sysbench` on `PATH`; without it the first sweep aborts.

use std::time::Duration;

use sweep_rs::harness::{MachineProfile, ProcessRunner, SweepController};
use sweep_rs::logging::SweepLogger;
use sweep_rs::output::export::{CsvExporter, Exporter};
use sweep_rs::output::visualization::{plot_sweep, sweep_file_stem};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let profile = MachineProfile::default()
        .name("Demo Machine")
        .max_threads(4)
        .trial_duration(Duration::from_secs(5))
        .memory_sizes("1M", "1G")
        .output_dir("demo_sweep");

    let logger = SweepLogger::builder()
        .file(profile.output_dir.join("sweep.log"))
        .build()?;

    let mut controller = SweepController::new(ProcessRunner::default(), logger.clone());

    for config in [profile.cpu_sweep(), profile.memory_sweep()] {
        let report = controller.run(&config)?;

        println!(
            "{}: {} sample(s), {} absent",
            report.workload,
            report.len(),
            report.absent_count()
        );

        let stem = profile.output_dir.join(sweep_file_stem(&report.label, &report.workload));
        let png = stem.with_extension("png");
        let csv = stem.with_extension("csv");

        logger.scope(|| -> Result<(), Box<dyn std::error::Error>> {
            plot_sweep(&report, &png.to_string_lossy(), None)?;
            CsvExporter::default().export_sweep(&report, &csv.to_string_lossy())?;
            Ok(())
        })?;
    }

    Ok(())
}
