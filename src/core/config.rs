//! Sweep configuration resolved once at startup.

use std::path::PathBuf;

use crate::{BenchError, BenchResult};

/// Environment variable overriding the per-run wall-clock limit, in hours.
pub const RUNTIME_VAR: &str = "RUNTIME";

/// Short enough for a quick scan, too short for a production run.
pub const DEFAULT_RUNTIME_HOURS: f64 = 0.002;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Engine binary (default: "gmx" from the whitelisted PATH)
    pub engine: PathBuf,
    /// Value passed to `-maxh` for every run
    pub runtime_hours: f64,
    /// Logical cores on the host; the sweep covers 1..=cores-1
    pub cores: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            engine: PathBuf::from("gmx"),
            runtime_hours: DEFAULT_RUNTIME_HOURS,
            cores: 1,
        }
    }
}

impl SweepConfig {
    /// Resolve from the process environment and the host's core count.
    pub fn from_env() -> BenchResult<Self> {
        let mut cfg = Self::from_lookup(|key| std::env::var(key).ok())?;
        cfg.cores = crate::logical_cores();
        Ok(cfg)
    }

    /// Resolve using an arbitrary variable lookup. `cores` is left at its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BenchResult<Self> {
        let runtime_hours = match lookup(RUNTIME_VAR) {
            Some(raw) => parse_runtime_hours(&raw)?,
            None => DEFAULT_RUNTIME_HOURS,
        };
        Ok(SweepConfig { runtime_hours, ..Default::default() })
    }

    pub fn with_engine(mut self, engine: impl Into<PathBuf>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    pub fn with_runtime_hours(mut self, hours: f64) -> Self {
        self.runtime_hours = hours;
        self
    }

    /// Core counts to sweep, ascending. Empty on a single-core host.
    pub fn core_counts(&self) -> std::ops::Range<usize> {
        1..self.cores.max(1)
    }
}

fn parse_runtime_hours(raw: &str) -> BenchResult<f64> {
    let hours: f64 = raw.trim().parse().map_err(|e| {
        BenchError::InvalidConfig(format!("${RUNTIME_VAR}={raw:?} is not a number: {e}"))
    })?;
    if !hours.is_finite() || hours <= 0.0 {
        return Err(BenchError::InvalidConfig(format!(
            "${RUNTIME_VAR} must be a positive number of hours, got {raw:?}"
        )));
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runtime_when_unset() {
        let cfg = SweepConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.runtime_hours, DEFAULT_RUNTIME_HOURS);
        assert_eq!(cfg.engine, PathBuf::from("gmx"));
    }

    #[test]
    fn test_runtime_override() {
        let cfg = SweepConfig::from_lookup(|k| (k == RUNTIME_VAR).then(|| " 0.25 ".to_string()))
            .unwrap();
        assert_eq!(cfg.runtime_hours, 0.25);
    }

    #[test]
    fn test_runtime_rejects_garbage() {
        let err = SweepConfig::from_lookup(|_| Some("ten".into())).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig(_)));
    }

    #[test]
    fn test_runtime_rejects_non_positive() {
        for raw in ["0", "-1", "inf", "NaN"] {
            let res = SweepConfig::from_lookup(|_| Some(raw.to_string()));
            assert!(res.is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_core_counts() {
        let cfg = SweepConfig::default().with_cores(4);
        assert_eq!(cfg.core_counts().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(SweepConfig::default().with_cores(1).core_counts().count(), 0);
        assert_eq!(SweepConfig::default().with_cores(0).core_counts().count(), 0);
    }
}
