//! Engine module: how `gmx` gets launched.
//!
//! # Architecture
//!
//! - **Invocation**: program plus ordered argument list. Never routed through a shell;
//!   rendered with shell quoting only for display and failure reports.
//!
//! - **Engine**: runs an invocation either captured (stdout/stderr collected for parsing)
//!   or passthrough (stdio inherited so the operator sees native diagnostics).
//!   Examples: `ProcessEngine` (real child processes), `MockEngine` (scripted, for tests).
//!
//! Every launch receives the whitelisted `EngineEnvironment` and nothing else.

pub mod mock;
pub mod process;
pub mod traits;

// Re-export key types for convenience
pub use mock::{MockCall, MockConfig, MockEngine};
pub use process::ProcessEngine;
pub use traits::{CapturedOutput, Engine, ExitState, Invocation};
