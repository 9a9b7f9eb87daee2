//! Engine backed by real child processes.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::EngineEnvironment;

use super::traits::{CapturedOutput, Engine, ExitState, Invocation};

/// Launches invocations with `std::process::Command`, without a shell.
///
/// Bare program names ("gmx") are looked up on the whitelisted PATH.
#[derive(Debug, Clone, Default)]
pub struct ProcessEngine;

impl ProcessEngine {
    pub fn new() -> Self {
        ProcessEngine
    }

    fn command(invocation: &Invocation, env: &EngineEnvironment) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).env_clear().envs(env.iter());
        cmd
    }
}

impl Engine for ProcessEngine {
    fn capture(
        &self,
        invocation: &Invocation,
        env: &EngineEnvironment,
    ) -> std::io::Result<CapturedOutput> {
        debug!(command = %invocation, "spawning (captured)");
        let output = Self::command(invocation, env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        Ok(CapturedOutput {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn passthrough(
        &self,
        invocation: &Invocation,
        env: &EngineEnvironment,
    ) -> std::io::Result<ExitState> {
        debug!(command = %invocation, "spawning (passthrough)");
        let status = Self::command(invocation, env).status()?;
        Ok(status.into())
    }
}
