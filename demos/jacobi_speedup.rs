//! Example: Jacobi-Poisson 1D - Parallel Strategy Comparison
//!
//! Plots measured speedup and average execution time of the 1-D
//! Jacobi-Poisson solver against problem size, one curve per
//! parallelization strategy, then prints summary statistics.
//!
//! **Strategies**:
//! - POSIX threads (2, 4, 8, 12)
//! - Forked processes
//! - OpenMP (4, 12 threads)
//! - MPI + OpenMP across 4 machines
//!
//! Outputs `jacobi_speedup.png` and `jacobi_average_time.png` in the
//! current directory.

use sweep_rs::analysis::{Series, StatsReport};
use sweep_rs::output::visualization::{plot_series_comparison, PlotConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {

    println!("═══════════════════════════════════════════════════════");
    println!("  Jacobi-Poisson 1D - Parallel Strategy Comparison");
    println!("═══════════════════════════════════════════════════════\n");

    let n_values = [10000.0, 50000.0, 100000.0, 500000.0, 1000000.0];

    // ====== Speedup relative to the sequential solver ======

    let speedup = vec![
        Series::new("2 Threads", vec![0.470522, 1.288695, 1.394428, 0.500509, 0.385104]),
        Series::new("4 Threads", vec![0.640994, 1.255446, 1.579055, 0.596547, 0.376401]),
        Series::new("8 Threads", vec![0.659887, 0.261465, 1.265006, 0.478186, 0.364140]),
        Series::new("12 Threads", vec![0.638786, 1.264673, 1.528077, 0.644961, 0.372577]),
        Series::new("Processes", vec![16.756673, 68.348837, 137.111520, 1234.051617, 1408.365501]),
    ];

    // Linear N axis, log speedup axis
    let mut config = PlotConfig::scaling("Speedup", "Jacobi-Poisson 1D Speedup");
    config.log_x = false;
    plot_series_comparison(&n_values, &speedup, "jacobi_speedup.png", Some(&config))?;
    println!("✓ jacobi_speedup.png");

    // ====== Average execution time (seconds) ======

    let times = vec![
        Series::new("Machine 1 - 4 pthreads", vec![0.025462, 0.058525, 0.094212, 3.005759, 8.025866]),
        Series::new("Machine 1 - 12 pthreads", vec![0.025550, 0.058098, 0.097355, 2.780131, 8.108239]),
        Series::new("Machine 1 - 4 OpenMP", vec![0.007783, 0.017743, 0.030177, 1.379991, 3.882430]),
        Series::new("Machine 1 - 12 OpenMP", vec![0.028022, 0.049433, 0.060699, 1.478105, 4.946107]),
        Series::new("Machine 2 - 4 nodes MPI+OpenMP", vec![1.272224, 1.761694, 1.388986, 2.024053, 2.477306]),
    ];

    let config = PlotConfig::scaling("Average Time (s)", "Execution Times - Jacobi-Poisson 1D");
    plot_series_comparison(&n_values, &times, "jacobi_average_time.png", Some(&config))?;
    println!("✓ jacobi_average_time.png\n");

    print!("{}", StatsReport::new(&n_values, &times));

    Ok(())
}
