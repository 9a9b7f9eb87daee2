//! `RunSpec` and the mdrun argument list it expands to.

use std::path::{Path, PathBuf};

use crate::engine::Invocation;
use crate::{BenchError, BenchResult};

/// Required suffix of the run input file.
pub const TPR_EXTENSION: &str = ".tpr";

/// Label of the throughput line mdrun prints to stderr at the end of a run.
pub const PERFORMANCE_LABEL: &str = "Performance:";

/// One mdrun at a fixed thread count.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSpec {
    tpr_file: String,
    plumed_file: Option<PathBuf>,
    extra_args: Vec<String>,
    n_cores: usize,
    runtime_hours: f64,
}

impl RunSpec {
    /// Fails with `InvalidInput` unless `tpr_file` ends in `.tpr`.
    pub fn new(tpr_file: &Path, n_cores: usize, runtime_hours: f64) -> BenchResult<Self> {
        let tpr_file = validate_tpr(tpr_file)?.to_string();
        Ok(RunSpec {
            tpr_file,
            plumed_file: None,
            extra_args: Vec::new(),
            n_cores,
            runtime_hours,
        })
    }

    pub fn with_plumed(mut self, plumed_file: Option<PathBuf>) -> Self {
        self.plumed_file = plumed_file;
        self
    }

    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn n_cores(&self) -> usize {
        self.n_cores
    }

    /// Output file stem: the input path minus `.tpr`, directories kept.
    pub fn deffnm(&self) -> &str {
        self.tpr_file.strip_suffix(TPR_EXTENSION).unwrap_or(&self.tpr_file)
    }

    /// mdrun argument list, in the order mdrun receives it.
    pub fn invocation(&self, engine_bin: &Path) -> Invocation {
        let mut inv = Invocation::new(engine_bin).args(["mdrun", "-deffnm", self.deffnm()]);
        if let Some(plumed) = &self.plumed_file {
            inv = inv.arg("-plumed").arg(plumed.to_string_lossy());
        }
        inv.args(self.extra_args.iter().cloned())
            .args(["-s", self.tpr_file.as_str()])
            .args(["-nt".to_string(), self.n_cores.to_string()])
            // run until -maxh stops it
            .args(["-nsteps", "-1"])
            .args(["-maxh".to_string(), self.runtime_hours.to_string()])
            .args(["--pin", "on"])
    }
}

/// Check the run input path and return it as UTF-8.
pub fn validate_tpr(tpr_file: &Path) -> BenchResult<&str> {
    let s = tpr_file.to_str().ok_or_else(|| {
        BenchError::InvalidInput(format!("tpr file path is not valid UTF-8: {}", tpr_file.display()))
    })?;
    if !s.ends_with(TPR_EXTENSION) {
        return Err(BenchError::InvalidInput(format!(
            "tpr file must end with {TPR_EXTENSION}: {s}"
        )));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(spec: &RunSpec) -> Vec<String> {
        spec.invocation(Path::new("gmx")).args
    }

    #[test]
    fn test_minimal_invocation() {
        let spec = RunSpec::new(Path::new("sim.tpr"), 4, 0.002).unwrap();
        let inv = spec.invocation(Path::new("gmx"));
        assert_eq!(inv.program, PathBuf::from("gmx"));
        assert_eq!(
            inv.args,
            vec![
                "mdrun", "-deffnm", "sim", "-s", "sim.tpr", "-nt", "4", "-nsteps", "-1", "-maxh",
                "0.002", "--pin", "on"
            ]
        );
        assert!(!inv.args.iter().any(|a| a == "-plumed"));
    }

    #[test]
    fn test_plumed_and_extra_args_order() {
        let spec = RunSpec::new(Path::new("runs/prod.tpr"), 2, 0.5)
            .unwrap()
            .with_plumed(Some(PathBuf::from("plumed.dat")))
            .with_extra_args(vec!["-ntomp".into(), "1".into()]);
        assert_eq!(
            args(&spec),
            vec![
                "mdrun", "-deffnm", "runs/prod", "-plumed", "plumed.dat", "-ntomp", "1", "-s",
                "runs/prod.tpr", "-nt", "2", "-nsteps", "-1", "-maxh", "0.5", "--pin", "on"
            ]
        );
    }

    #[test]
    fn test_rejects_wrong_extension() {
        for bad in ["sim.gro", "sim.tpr.bak", "sim", "sim.TPR"] {
            let err = RunSpec::new(Path::new(bad), 1, 0.002).unwrap_err();
            assert!(matches!(err, BenchError::InvalidInput(_)), "{bad}");
        }
    }

    #[test]
    fn test_path_with_spaces_stays_one_argument() {
        let spec = RunSpec::new(Path::new("my sim.tpr"), 1, 1.0).unwrap();
        let a = args(&spec);
        assert_eq!(a[2], "my sim");
        assert!(a.contains(&"my sim.tpr".to_string()));
        assert!(a.contains(&"1".to_string()));
    }
}
