//! Core types shared by the prober, the run executor and the sweep.
//!
//! This module holds the process-scoped inputs that every engine invocation sees:
//! the whitelisted environment snapshot and the sweep configuration.

pub mod config;
pub mod env;
pub mod scan;

// Re-export key types for convenience
pub use config::{DEFAULT_RUNTIME_HOURS, RUNTIME_VAR, SweepConfig};
pub use env::{ENGINE_ENV_KEYS, EngineEnvironment};
pub use scan::scan_labels;
