//! Metric extraction from free-text tool output
//!
//! The extractor's whole contract is `(text, kind) -> Metric`. Each
//! [`MetricKind`] owns an ordered list of patterns: the first one that matches
//! wins, later ones are looser fallbacks for formatting drift in the tool's
//! report.
//!
//! Extraction never fails. Anything that prevents a number from being read is
//! logged once as a warning (with the full text) and returned as
//! [`Metric::Absent`].
//!
//! # Example
//!
//! ```rust
//! use sweep_rs::harness::{extract, Metric, MetricKind};
//!
//! let text = "CPU speed:\n    events per second:  1234.50\n";
//! assert_eq!(extract(Some(text), MetricKind::CpuEventsPerSecond), Metric::Present(1234.5));
//! ```

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

static EVENTS_PER_SECOND: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"events per second:\s*([\d.]+)").expect("valid events pattern")]
});

static MEMORY_TRANSFER_RATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "24576.00 MiB transferred (8190.51 MiB/sec)"
        Regex::new(r"MiB transferred.*?\(\s*([\d.]+)\s*MiB/sec\)").expect("valid transfer pattern"),
        // best-effort: "transferred 8190.51 MiB/sec"
        Regex::new(r"transferred\s+(\d+\.\d+)\s+MiB/sec").expect("valid loose transfer pattern"),
    ]
});

// =================================================================================================
// Metric Kind
// =================================================================================================

/// Which number to pull out of the tool's report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// `events per second: <float>` from the CPU workload
    CpuEventsPerSecond,

    /// `<float> MiB transferred (<float> MiB/sec)` from the memory workload
    MemoryTransferRate,
}

impl MetricKind {
    /// Short identifier, used in file names and log fields
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::CpuEventsPerSecond => "cpu",
            MetricKind::MemoryTransferRate => "memory",
        }
    }

    /// Unit appended to values in log lines
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::CpuEventsPerSecond => "events/sec",
            MetricKind::MemoryTransferRate => "MiB/sec",
        }
    }

    /// Y-axis label for plots and column header for tables
    pub fn axis_label(&self) -> &'static str {
        match self {
            MetricKind::CpuEventsPerSecond => "Events Per Second",
            MetricKind::MemoryTransferRate => "Transfer (MiB/sec)",
        }
    }

    fn patterns(&self) -> &'static [Regex] {
        match self {
            MetricKind::CpuEventsPerSecond => &EVENTS_PER_SECOND,
            MetricKind::MemoryTransferRate => &MEMORY_TRANSFER_RATE,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::CpuEventsPerSecond => write!(f, "events per second"),
            MetricKind::MemoryTransferRate => write!(f, "MiB/sec"),
        }
    }
}

// =================================================================================================
// Metric
// =================================================================================================

/// Why a sample carries no value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsentReason {
    /// The tool exited non-zero or could not be run for this point
    InvocationFailed,

    /// None of the kind's patterns matched the output
    PatternNotFound,

    /// A pattern matched but the captured text is not a finite number
    MalformedNumber,
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AbsentReason::InvocationFailed => "invocation failed",
            AbsentReason::PatternNotFound => "pattern not found",
            AbsentReason::MalformedNumber => "malformed number",
        };
        f.write_str(text)
    }
}

/// Measured value of one sweep point, or the reason there is none
///
/// A missing value is never zero: callers have to match on the variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Metric {
    Present(f64),
    Absent(AbsentReason),
}

impl Metric {
    /// The value, if one was measured
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Present(v) => Some(*v),
            Metric::Absent(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Metric::Present(_))
    }
}

// =================================================================================================
// Extraction
// =================================================================================================

/// Extract `kind` from raw tool output
///
/// `None` means the invocation itself failed; it is passed through as
/// [`AbsentReason::InvocationFailed`] without attempting any match.
pub fn extract(output: Option<&str>, kind: MetricKind) -> Metric {
    let Some(text) = output else {
        return Metric::Absent(AbsentReason::InvocationFailed);
    };

    let captured = kind
        .patterns()
        .iter()
        .find_map(|pattern| pattern.captures(text).and_then(|caps| caps.get(1)));

    let Some(number) = captured else {
        warn!(metric = kind.name(), "could not parse '{}' from output:\n{}", kind, text);
        return Metric::Absent(AbsentReason::PatternNotFound);
    };

    match number.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() => Metric::Present(value),
        _ => {
            warn!(
                metric = kind.name(),
                "malformed '{}' value '{}' in output:\n{}",
                kind,
                number.as_str(),
                text
            );
            Metric::Absent(AbsentReason::MalformedNumber)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPU_REPORT: &str = "\
sysbench 1.0.20 (using system LuaJIT 2.1.0-beta3)

Running the test with following options:
Number of threads: 4

CPU speed:
    events per second:  4521.87

General statistics:
    total time:                          60.0004s
    total number of events:              271319
";

    const MEMORY_REPORT: &str = "\
Running memory speed test with the following options:
  block size: 1024KiB
  total size: 24576MiB
  operation: write
  scope: global

Total operations: 24576 (16401.37 per second)

24576.00 MiB transferred (16401.37 MiB/sec)
";

    #[test]
    fn test_cpu_events_per_second() {
        let metric = extract(Some("events per second: 1234.50"), MetricKind::CpuEventsPerSecond);
        assert_eq!(metric, Metric::Present(1234.5));
    }

    #[test]
    fn test_cpu_full_report() {
        let metric = extract(Some(CPU_REPORT), MetricKind::CpuEventsPerSecond);
        assert_eq!(metric.value(), Some(4521.87));
    }

    #[test]
    fn test_memory_transfer_rate() {
        let metric = extract(
            Some("1024.00 MiB transferred (512.75 MiB/sec)"),
            MetricKind::MemoryTransferRate,
        );
        assert_eq!(metric, Metric::Present(512.75));
    }

    #[test]
    fn test_memory_full_report() {
        let metric = extract(Some(MEMORY_REPORT), MetricKind::MemoryTransferRate);
        assert_eq!(metric.value(), Some(16401.37));
    }

    #[test]
    fn test_memory_loose_fallback() {
        let metric = extract(
            Some("Total transferred 812.25 MiB/sec"),
            MetricKind::MemoryTransferRate,
        );
        assert_eq!(metric, Metric::Present(812.25));
    }

    #[test]
    fn test_primary_pattern_wins_over_fallback() {
        let text = "transferred 1.50 MiB/sec\n10.00 MiB transferred (99.00 MiB/sec)";
        let metric = extract(Some(text), MetricKind::MemoryTransferRate);
        assert_eq!(metric, Metric::Present(99.0));
    }

    #[test]
    fn test_first_occurrence_is_used() {
        let text = "events per second: 10.0\nevents per second: 20.0";
        assert_eq!(extract(Some(text), MetricKind::CpuEventsPerSecond).value(), Some(10.0));
    }

    #[test]
    fn test_absent_input_short_circuits() {
        assert_eq!(
            extract(None, MetricKind::CpuEventsPerSecond),
            Metric::Absent(AbsentReason::InvocationFailed)
        );
        assert_eq!(
            extract(None, MetricKind::MemoryTransferRate),
            Metric::Absent(AbsentReason::InvocationFailed)
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(
            extract(Some("nothing useful here"), MetricKind::CpuEventsPerSecond),
            Metric::Absent(AbsentReason::PatternNotFound)
        );
    }

    #[test]
    fn test_wrong_kind_does_not_match() {
        assert_eq!(
            extract(Some(CPU_REPORT), MetricKind::MemoryTransferRate),
            Metric::Absent(AbsentReason::PatternNotFound)
        );
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            extract(Some("events per second: 1.2.3"), MetricKind::CpuEventsPerSecond),
            Metric::Absent(AbsentReason::MalformedNumber)
        );
    }

    #[test]
    fn test_metric_value_accessors() {
        assert!(Metric::Present(1.0).is_present());
        assert!(!Metric::Absent(AbsentReason::PatternNotFound).is_present());
        assert_eq!(Metric::Absent(AbsentReason::MalformedNumber).value(), None);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(MetricKind::CpuEventsPerSecond.axis_label(), "Events Per Second");
        assert_eq!(MetricKind::MemoryTransferRate.unit(), "MiB/sec");
        assert_eq!(MetricKind::MemoryTransferRate.name(), "memory");
    }
}
