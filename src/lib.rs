pub mod core;
pub mod engine;
pub mod probe;
pub mod run;
pub mod sweep_cmd;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("gmx not found or not working: {0}")]
    EngineNotFound(String),
    #[error("unrecognized `gmx --version` output (no `GROMACS version:` line)")]
    UnrecognizedProbeOutput,
    #[error("diagnostic re-run of `{command}` failed: {status}")]
    DiagnosticRerunFailed { command: String, status: String },
    #[error("{0}")]
    Message(String),
}

pub type BenchResult<T> = Result<T, BenchError>;

// Shared helpers

/// Number of logical processors reported by the host.
///
/// Falls back to `available_parallelism` when sysinfo reports no CPUs, and to 1 after that.
pub fn logical_cores() -> usize {
    use sysinfo::{CpuRefreshKind, RefreshKind, System};
    let sys = System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::new()));
    match sys.cpus().len() {
        0 => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        n => n,
    }
}
