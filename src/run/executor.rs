//! Run one mdrun and pull the throughput line out of its stderr.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::EngineEnvironment;
use crate::engine::Engine;

use super::outcome::{FailureReason, RunOutcome, Throughput};
use super::spec::{PERFORMANCE_LABEL, RunSpec};

/// Width of the progress line cleared after a successful run.
const PROGRESS_WIDTH: usize = 80;

/// First line containing the `Performance:` label.
pub fn find_throughput(stderr: &str) -> Option<Throughput> {
    stderr.lines().find(|line| line.contains(PERFORMANCE_LABEL)).map(Throughput::from_line)
}

/// Execute `spec` once, captured, and classify the result.
pub fn execute(
    engine: &dyn Engine,
    engine_bin: &Path,
    env: &EngineEnvironment,
    spec: &RunSpec,
) -> RunOutcome {
    let invocation = spec.invocation(engine_bin);
    print!("command='{invocation}'\r");
    let _ = std::io::stdout().flush();

    let output = match engine.capture(&invocation, env) {
        Ok(output) => output,
        Err(e) => {
            warn!(command = %invocation, error = %e, "mdrun could not be started");
            println!("Command failed");
            return RunOutcome::Failure { invocation, reason: FailureReason::Spawn(e.to_string()) };
        }
    };
    if !output.status.success {
        warn!(command = %invocation, status = %output.status, "mdrun failed");
        println!("Command failed");
        return RunOutcome::Failure { invocation, reason: FailureReason::Exit(output.status) };
    }

    print!("{}\r", " ".repeat(PROGRESS_WIDTH));
    let _ = std::io::stdout().flush();

    match find_throughput(&output.stderr) {
        Some(throughput) => {
            info!(
                nt = spec.n_cores(),
                ns_per_day = ?throughput.ns_per_day,
                hour_per_ns = ?throughput.hour_per_ns,
                "run finished"
            );
            println!("nt: {}            (ns/day)    (hour/ns)", spec.n_cores());
            println!("{}\n", throughput.line);
            RunOutcome::Success(throughput)
        }
        None => {
            debug!(stderr = %output.stderr, "no throughput line");
            let reason = FailureReason::MetricNotFound;
            println!("Command failed: {reason}");
            RunOutcome::Failure { invocation, reason }
        }
    }
}
