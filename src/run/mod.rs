//! Single mdrun invocations: what to run, how to run it, what came back.

pub mod executor;
pub mod outcome;
pub mod spec;

// Re-export key types for convenience
pub use executor::{execute, find_throughput};
pub use outcome::{FailureReason, RunOutcome, Throughput};
pub use spec::{PERFORMANCE_LABEL, RunSpec, TPR_EXTENSION};
