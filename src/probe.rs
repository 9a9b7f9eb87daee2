//! Installation probe: `gmx --version`.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::core::{EngineEnvironment, scan_labels};
use crate::engine::{Engine, Invocation};
use crate::{BenchError, BenchResult};

const VERSION_LABEL: &str = "GROMACS version:";
const GPU_LABEL: &str = "GPU support:";
const EXECUTABLE_LABEL: &str = "Executable:";

/// What `gmx --version` reported. `None` means the label never appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallationInfo {
    pub version: Option<String>,
    pub gpu_support: Option<String>,
    pub executable: Option<String>,
}

impl InstallationInfo {
    /// Parse `gmx --version` output. Duplicate labels: the last line wins.
    pub fn parse(output: &str) -> Self {
        let [version, gpu_support, executable] =
            scan_labels(output, [VERSION_LABEL, GPU_LABEL, EXECUTABLE_LABEL]);
        InstallationInfo { version, gpu_support, executable }
    }
}

impl fmt::Display for InstallationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "unknown".to_string());
        writeln!(f, "Found gmx version:\n\t{}", show(&self.version))?;
        writeln!(f, "GPU support:\n\t{}", show(&self.gpu_support))?;
        write!(f, "Found gmx installation:\n\t{}", show(&self.executable))
    }
}

pub fn version_invocation(engine_bin: &Path) -> Invocation {
    Invocation::new(engine_bin).arg("--version")
}

/// Check that the engine runs and report what it is.
///
/// Fails when the probe cannot be started, exits non-zero, or its output has no version line.
/// Missing GPU/executable lines only produce a warning.
pub fn probe(
    engine: &dyn Engine,
    engine_bin: &Path,
    env: &EngineEnvironment,
) -> BenchResult<InstallationInfo> {
    let invocation = version_invocation(engine_bin);
    let output = engine
        .capture(&invocation, env)
        .map_err(|e| BenchError::EngineNotFound(format!("failed to run `{invocation}`: {e}")))?;
    if !output.status.success {
        return Err(BenchError::EngineNotFound(format!(
            "`{invocation}` failed with {}",
            output.status
        )));
    }

    let info = InstallationInfo::parse(&output.stdout);
    if info.version.is_none() {
        return Err(BenchError::UnrecognizedProbeOutput);
    }
    if info.gpu_support.is_none() {
        warn!("no `{GPU_LABEL}` line in `{invocation}` output");
    }
    if info.executable.is_none() {
        warn!("no `{EXECUTABLE_LABEL}` line in `{invocation}` output");
    }
    info!(version = ?info.version, gpu = ?info.gpu_support, exe = ?info.executable, "probed gmx");

    println!("{info}");
    Ok(info)
}
