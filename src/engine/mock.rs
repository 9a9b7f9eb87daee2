//! Mock engine for testing.

use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::core::EngineEnvironment;

use super::traits::{CapturedOutput, Engine, ExitState, Invocation};

/// Canned `gmx --version` output used by the default mock.
pub const MOCK_VERSION_OUTPUT: &str = "\
                         :-) GROMACS - gmx, 2023.1 (-:

Executable:   /usr/bin/gmx
Data prefix:  /usr
GROMACS version:    2023.1
Precision:          mixed
GPU support:        disabled
";

/// Configuration for mock engine responses.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// stdout returned for `--version`
    pub version_stdout: String,
    /// Whether `--version` exits non-zero
    pub version_fails: bool,
    /// Whether any launch fails to spawn
    pub spawn_fails: bool,
    /// stderr returned for a successful mdrun; `{nt}` is replaced by the thread count
    pub run_stderr: String,
    /// Thread counts whose captured mdrun exits non-zero
    pub failing_cores: BTreeSet<usize>,
    /// Whether passthrough (diagnostic) launches exit non-zero
    pub passthrough_fails: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            version_stdout: MOCK_VERSION_OUTPUT.to_string(),
            version_fails: false,
            spawn_fails: false,
            run_stderr: "Started mdrun\n\n               (ns/day)    (hour/ns)\nPerformance:       {nt}.000        0.500\n\nGROMACS reminds you: \"mock\"\n".to_string(),
            failing_cores: BTreeSet::new(),
            passthrough_fails: false,
        }
    }
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mdrun stderr template.
    pub fn with_run_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.run_stderr = stderr.into();
        self
    }

    /// Set the `--version` output.
    pub fn with_version_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.version_stdout = stdout.into();
        self
    }

    /// Make `--version` exit non-zero.
    pub fn version_fails(mut self) -> Self {
        self.version_fails = true;
        self
    }

    /// Make every launch fail to spawn.
    pub fn spawn_fails(mut self) -> Self {
        self.spawn_fails = true;
        self
    }

    /// Make the captured mdrun with `n` threads exit non-zero.
    pub fn fail_on_cores(mut self, n: usize) -> Self {
        self.failing_cores.insert(n);
        self
    }

    /// Make diagnostic re-runs exit non-zero.
    pub fn passthrough_fails(mut self) -> Self {
        self.passthrough_fails = true;
        self
    }
}

/// One recorded launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Captured(Invocation),
    Passthrough(Invocation),
}

impl MockCall {
    pub fn invocation(&self) -> &Invocation {
        match self {
            MockCall::Captured(inv) | MockCall::Passthrough(inv) => inv,
        }
    }
}

/// Mock engine for unit testing.
///
/// Returns scripted output without starting any process and records every launch.
pub struct MockEngine {
    config: MockConfig,
    calls: Mutex<Vec<MockCall>>,
}

impl MockEngine {
    pub fn new(config: MockConfig) -> Self {
        MockEngine { config, calls: Mutex::new(Vec::new()) }
    }

    /// Every launch so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Thread counts of captured mdrun launches, in order.
    pub fn run_cores(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                MockCall::Captured(inv) => inv.flag_value("-nt")?.parse().ok(),
                MockCall::Passthrough(_) => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn spawn_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock engine: no such program")
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

impl Engine for MockEngine {
    fn capture(
        &self,
        invocation: &Invocation,
        _env: &EngineEnvironment,
    ) -> std::io::Result<CapturedOutput> {
        self.record(MockCall::Captured(invocation.clone()));
        if self.config.spawn_fails {
            return Err(Self::spawn_error());
        }

        if invocation.args.iter().any(|a| a == "--version") {
            if self.config.version_fails {
                return Ok(CapturedOutput::failure(1, "mock: version query failed\n"));
            }
            return Ok(CapturedOutput::success(self.config.version_stdout.clone(), ""));
        }

        let nt: usize = invocation.flag_value("-nt").and_then(|v| v.parse().ok()).unwrap_or(0);
        if self.config.failing_cores.contains(&nt) {
            return Ok(CapturedOutput::failure(1, "Fatal error:\nmock failure\n"));
        }
        let stderr = self.config.run_stderr.replace("{nt}", &nt.to_string());
        Ok(CapturedOutput::success("", stderr))
    }

    fn passthrough(
        &self,
        invocation: &Invocation,
        _env: &EngineEnvironment,
    ) -> std::io::Result<ExitState> {
        self.record(MockCall::Passthrough(invocation.clone()));
        if self.config.spawn_fails {
            return Err(Self::spawn_error());
        }
        if self.config.passthrough_fails {
            return Ok(ExitState::code(1));
        }
        Ok(ExitState::ok())
    }
}
