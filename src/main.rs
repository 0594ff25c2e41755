// Entry point: runs benchmark sweeps or analyses solver timing tables.
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

use sweep_rs::analysis::{read_timing_csv, read_xy_profile, PivotTable};
use sweep_rs::harness::{MachineProfile, ProcessRunner, SweepController, SweepReport, DEFAULT_PROGRAM};
use sweep_rs::logging::SweepLogger;
use sweep_rs::output::export::{export_pivot_csv, export_pivot_html, CsvConfig, CsvExporter, CsvMetadata, Exporter};
use sweep_rs::output::visualization::{
    plot_pivot_heatmap, plot_profile, plot_sweep, plot_xy_series, sweep_file_stem, PlotConfig, RenderStatus,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep the thread count of the benchmark tool and plot the results
    Sweep(SweepArgs),

    /// Pivot a solver timing CSV (N, NSTEPS, TIME) into tables, a heatmap and scaling plots
    Timings(TimingsArgs),

    /// Plot a two-column solver output file (x y per line)
    Profile(ProfileArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Cpu,
    Memory,
    All,
}

#[derive(clap::Args, Debug)]
struct SweepArgs {
    /// Which workload(s) to sweep
    #[arg(value_enum, default_value_t = Target::All)]
    target: Target,

    /// Sweep covers 1..=max_threads
    #[arg(long, default_value_t = 12)]
    max_threads: u32,

    /// Seconds per trial
    #[arg(long, default_value_t = 60)]
    time: u64,

    /// Memory workload block size
    #[arg(long, default_value = "1M")]
    block_size: String,

    /// Memory workload total size
    #[arg(long, default_value = "24G")]
    total_size: String,

    /// Machine label used in titles and file names
    #[arg(long, default_value = "Machine 1")]
    label: String,

    /// Directory for plots, tables and the log
    #[arg(long, default_value = "Machine1")]
    out_dir: PathBuf,

    /// Benchmark executable
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: String,
}

#[derive(clap::Args, Debug)]
struct TimingsArgs {
    /// CSV with columns N, NSTEPS, TIEMPO(s) or TIME(s)
    #[arg(value_name = "CSV")]
    csv: PathBuf,

    /// Directory for the tables and plots
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
struct ProfileArgs {
    /// Solver output, e.g. u_serial.out
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Image to write; defaults to the input name with a .png extension
    #[arg(long)]
    output: Option<PathBuf>,

    /// Plot title
    #[arg(long, default_value = "Serial solution")]
    title: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Sweep(args) => run_sweeps(args),
        Command::Timings(args) => run_timings(args),
        Command::Profile(args) => run_profile(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =================================================================================================
// sweep
// =================================================================================================

fn run_sweeps(args: SweepArgs) -> Result<(), Box<dyn Error>> {
    let profile = MachineProfile::default()
        .name(args.label)
        .max_threads(args.max_threads)
        .trial_duration(Duration::from_secs(args.time))
        .memory_sizes(args.block_size, args.total_size)
        .output_dir(args.out_dir);

    let logger = SweepLogger::builder().file(profile.log_path()).build()?;

    let mut sweeps = Vec::new();
    if matches!(args.target, Target::Cpu | Target::All) {
        sweeps.push(profile.cpu_sweep());
    }
    if matches!(args.target, Target::Memory | Target::All) {
        sweeps.push(profile.memory_sweep());
    }

    let mut controller = SweepController::new(ProcessRunner::new(args.program), logger.clone());

    logger.scope(|| -> Result<(), Box<dyn Error>> {
        info!("--- Starting benchmarks {} ---", profile.name);
        info!("Results and logs in: {}", profile.output_dir.display());
        info!("Trial duration: {}s", profile.trial_duration.as_secs());

        for config in &sweeps {
            let report = controller.run(config).map_err(|e| {
                error!("{}", e);
                e
            })?;
            save_report(&report, &profile.output_dir);
        }

        info!("--- Benchmarks {} completed ---", profile.name);
        Ok(())
    })
}

/// Plot and tabulate one report; failures are logged, not fatal
fn save_report(report: &SweepReport, out_dir: &Path) {
    let stem = sweep_file_stem(&report.label, &report.workload);

    let plot_path = out_dir.join(format!("{}.png", stem));
    match plot_sweep(report, &plot_path.to_string_lossy(), None) {
        Ok(RenderStatus::Rendered { points }) => info!("Plotted {} of {} point(s)", points, report.len()),
        Ok(RenderStatus::Skipped) => {}
        Err(e) => error!("Error saving plot {}: {}", plot_path.display(), e),
    }

    let table_path = out_dir.join(format!("{}.csv", stem));
    let exporter = CsvExporter::new(CsvConfig::default().precision(2).with_metadata(CsvMetadata::from_report(report)));
    if let Err(e) = exporter.export_sweep(report, &table_path.to_string_lossy()) {
        error!("Error saving table {}: {}", table_path.display(), e);
    }
}

// =================================================================================================
// timings
// =================================================================================================

fn run_timings(args: TimingsArgs) -> Result<(), Box<dyn Error>> {
    let logger = SweepLogger::console();
    logger.scope(|| -> Result<(), Box<dyn Error>> {
        let records = read_timing_csv(&args.csv)?;
        let table = PivotTable::from_records(&records);
        info!("Read {} timing record(s) from {}", records.len(), args.csv.display());

        println!("Timing table (seconds):");
        println!("{}", table);

        fs::create_dir_all(&args.out_dir)?;
        let out = |name: &str| args.out_dir.join(name).to_string_lossy().into_owned();

        export_pivot_csv(&table, &out("timing_table.csv"), None)?;
        export_pivot_html(&table, "Timing Table (seconds)", &out("timing_table.html"))?;

        plot_pivot_heatmap(&table, &out("heatmap_times.png"), None)?;

        let by_n: Vec<(String, Vec<(f64, f64)>)> = table
            .series_by_column()
            .into_iter()
            .map(|(nsteps, points)| (format!("NSTEPS={}", nsteps), loggable(points)))
            .filter(|(_, points)| !points.is_empty())
            .collect();

        let mut config = PlotConfig::scaling("Execution Time (s)", "Time Scaling with Grid Size");
        config.xlabel = "Grid Size (N)".to_string();
        plot_scaling(&by_n, &out("time_vs_n.png"), &config)?;

        let by_nsteps: Vec<(String, Vec<(f64, f64)>)> = table
            .series_by_row()
            .into_iter()
            .map(|(n, points)| (format!("N={}", n), loggable(points)))
            .filter(|(_, points)| !points.is_empty())
            .collect();

        let mut config = PlotConfig::scaling("Execution Time (s)", "Time Scaling with Iteration Count");
        config.xlabel = "Iterations (NSTEPS)".to_string();
        plot_scaling(&by_nsteps, &out("time_vs_nsteps.png"), &config)?;

        info!("Timing outputs written to {}", args.out_dir.display());
        Ok(())
    })
}

/// Log-log plot of the series, skipped with a warning when nothing is positive
fn plot_scaling(datasets: &[(String, Vec<(f64, f64)>)], path: &str, config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    if datasets.is_empty() {
        warn!("No positive timings to plot on log axes, skipping {}", path);
        return Ok(());
    }
    plot_xy_series(datasets, path, Some(config))
}

/// Points that can be drawn on log-log axes
fn loggable(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    points.into_iter().filter(|&(x, y)| x > 0.0 && y > 0.0).collect()
}

// =================================================================================================
// profile
// =================================================================================================

fn run_profile(args: ProfileArgs) -> Result<(), Box<dyn Error>> {
    let logger = SweepLogger::console();
    logger.scope(|| -> Result<(), Box<dyn Error>> {
        let points = read_xy_profile(&args.input)?;
        info!("Read {} point(s) from {}", points.len(), args.input.display());

        let output = args.output.clone().unwrap_or_else(|| args.input.with_extension("png"));
        let config = PlotConfig::profile(args.title.as_str());
        plot_profile(&points, &output.to_string_lossy(), Some(&config))
    })
}
