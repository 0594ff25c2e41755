//! Harness error types
//!
//! Only conditions that stop a sweep live here. Per-point failures (non-zero
//! exit, unparsable output) are data, carried by [`Metric::Absent`](super::Metric).

use thiserror::Error;

/// Errors that cross the sweep controller boundary
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The benchmark executable could not be located
    #[error("benchmark tool '{program}' not found")]
    ToolMissing { program: String },

    /// A sweep stopped before its last point
    #[error("sweep '{label}' aborted at point {index} (threads={threads}): {source}")]
    Aborted {
        label: String,
        index: usize,
        threads: u32,
        #[source]
        source: Box<HarnessError>,
    },

    /// Sweep configuration rejected before the first invocation
    #[error("invalid sweep configuration: {0}")]
    InvalidConfig(String),

    /// Log sink could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Whether this error represents the tool-missing condition,
    /// directly or as the cause of an aborted sweep
    pub fn is_tool_missing(&self) -> bool {
        match self {
            HarnessError::ToolMissing { .. } => true,
            HarnessError::Aborted { source, .. } => source.is_tool_missing(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_missing_display() {
        let err = HarnessError::ToolMissing { program: "sysbench".to_string() };
        assert_eq!(err.to_string(), "benchmark tool 'sysbench' not found");
        assert!(err.is_tool_missing());
    }

    #[test]
    fn test_aborted_wraps_tool_missing() {
        let err = HarnessError::Aborted {
            label: "Machine 1".to_string(),
            index: 2,
            threads: 3,
            source: Box::new(HarnessError::ToolMissing { program: "sysbench".to_string() }),
        };
        assert!(err.is_tool_missing());
        assert!(err.to_string().contains("threads=3"));
    }

    #[test]
    fn test_invalid_config_is_not_tool_missing() {
        let err = HarnessError::InvalidConfig("empty range".to_string());
        assert!(!err.is_tool_missing());
    }
}
