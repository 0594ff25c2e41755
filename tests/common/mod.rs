//! Common utilities for integration tests

pub mod mock_runners;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_runners::{MissingAfter, ScriptedRunner, Step};
pub use test_helpers::{assert_points_close, cpu_output, memory_output, threads_of};
