//! Helper functions for integration tests

use approx::assert_relative_eq;
use sweep_rs::harness::InvocationSpec;

/// Thread count encoded in `--threads=N`
pub fn threads_of(spec: &InvocationSpec) -> u32 {
    spec.args()
        .iter()
        .find_map(|arg| arg.strip_prefix("--threads="))
        .and_then(|n| n.parse().ok())
        .expect("invocation without --threads")
}

/// Minimal CPU workload report
pub fn cpu_output(events_per_second: f64) -> String {
    format!(
        "CPU speed:\n    events per second: {:.2}\n\nGeneral statistics:\n    total time: 60.0012s\n",
        events_per_second
    )
}

/// Minimal memory workload report
pub fn memory_output(mib: f64, rate: f64) -> String {
    format!(
        "Total operations: 1048576 (1000.00 per second)\n\n{:.2} MiB transferred ({:.2} MiB/sec)\n",
        mib, rate
    )
}

/// Assert two point sequences match in order, values within relative tolerance
pub fn assert_points_close(actual: &[(u32, f64)], expected: &[(u32, f64)]) {
    assert_eq!(actual.len(), expected.len(), "point count mismatch");

    for ((a_x, a_y), (e_x, e_y)) in actual.iter().zip(expected) {
        assert_eq!(a_x, e_x, "thread count mismatch");
        assert_relative_eq!(*a_y, *e_y, max_relative = 1e-9);
    }
}
