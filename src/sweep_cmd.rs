//! Core-count sweep: run mdrun at 1..N-1 threads and print each throughput line.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::{EngineEnvironment, RUNTIME_VAR, SweepConfig};
use crate::engine::{Engine, Invocation, ProcessEngine};
use crate::probe::probe;
use crate::run::spec::validate_tpr;
use crate::run::{RunOutcome, RunSpec, execute};
use crate::{BenchError, BenchResult};

/// Positional inputs of a sweep, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SweepRequest {
    pub tpr_file: PathBuf,
    pub plumed_file: Option<String>,
    pub extra_args: Vec<String>,
}

impl SweepRequest {
    pub fn new(tpr_file: impl Into<PathBuf>) -> Self {
        SweepRequest { tpr_file: tpr_file.into(), ..Default::default() }
    }

    pub fn with_plumed(mut self, plumed_file: impl Into<String>) -> Self {
        self.plumed_file = Some(plumed_file.into());
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Empty or literal "false" means no PLUMED input.
pub fn normalize_plumed(arg: Option<&str>) -> Option<PathBuf> {
    match arg {
        None | Some("") | Some("false") => None,
        Some(p) => Some(PathBuf::from(p)),
    }
}

pub struct Sweep<'a> {
    config: SweepConfig,
    engine: &'a dyn Engine,
}

impl<'a> Sweep<'a> {
    pub fn new(config: SweepConfig, engine: &'a dyn Engine) -> Self {
        Sweep { config, engine }
    }

    /// Validate inputs, probe the installation, then run every core count in order.
    ///
    /// A failed run is re-issued once with inherited stdio so gmx's own error text is visible;
    /// if that re-run fails too the sweep stops with `DiagnosticRerunFailed`.
    pub fn run(&self, request: &SweepRequest) -> BenchResult<()> {
        println!("Welcome to gmx_speedtest! \n");

        let tpr = validate_tpr(&request.tpr_file)?;
        println!("Using tpr file:\n\t{tpr}");
        let plumed = normalize_plumed(request.plumed_file.as_deref());
        if let Some(p) = &plumed {
            println!("Using plumed file:\n\t{}", p.display());
        }
        if !request.extra_args.is_empty() {
            println!("Using extra args:\n\t{:?}", request.extra_args);
        }

        let env = EngineEnvironment::resolve();
        probe(self.engine, &self.config.engine, &env)?;
        println!("To change the length of the test runs, set env variable ${RUNTIME_VAR} (hours).\n");

        info!(
            cores = self.config.cores,
            runtime_hours = self.config.runtime_hours,
            "starting sweep"
        );
        for n in self.config.core_counts() {
            print!("Running speedtest with {n} cores...\r");
            let spec = RunSpec::new(&request.tpr_file, n, self.config.runtime_hours)?
                .with_plumed(plumed.clone())
                .with_extra_args(request.extra_args.clone());
            if let RunOutcome::Failure { invocation, reason } =
                execute(self.engine, &self.config.engine, &env, &spec)
            {
                warn!(nt = n, %reason, "run failed, re-running with native output");
                self.diagnose(&invocation, &env)?;
            }
        }
        Ok(())
    }

    fn diagnose(&self, invocation: &Invocation, env: &EngineEnvironment) -> BenchResult<()> {
        let status = match self.engine.passthrough(invocation, env) {
            Ok(status) if status.success => {
                warn!(command = %invocation, "diagnostic re-run succeeded, continuing");
                return Ok(());
            }
            Ok(status) => status.to_string(),
            Err(e) => format!("failed to start: {e}"),
        };
        Err(BenchError::DiagnosticRerunFailed { command: invocation.command_line(), status })
    }
}

/// Run a sweep against the real `gmx`.
pub fn run(config: SweepConfig, request: SweepRequest) -> BenchResult<()> {
    let engine = ProcessEngine::new();
    Sweep::new(config, &engine).run(&request)
}
