//! Engine trait and the value types that cross it.

use std::fmt;
use std::path::PathBuf;

use crate::core::EngineEnvironment;

/// A single engine launch: program plus arguments, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Invocation { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value following `flag`, if the flag is present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let idx = self.args.iter().position(|a| a == flag)?;
        self.args.get(idx + 1).map(String::as_str)
    }

    /// Shell-quoted command line, suitable for copy/paste.
    pub fn command_line(&self) -> String {
        let program = self.program.to_string_lossy();
        let words = std::iter::once(program.as_ref()).chain(self.args.iter().map(String::as_str));
        match shlex::try_join(words.clone()) {
            Ok(s) => s,
            // Only fails on interior NUL bytes; fall back to a plain join for display.
            Err(_) => words.collect::<Vec<_>>().join(" "),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitState {
    pub success: bool,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ExitState {
    pub fn ok() -> Self {
        ExitState { success: true, code: Some(0) }
    }

    pub fn code(code: i32) -> Self {
        ExitState { success: code == 0, code: Some(code) }
    }
}

impl From<std::process::ExitStatus> for ExitState {
    fn from(status: std::process::ExitStatus) -> Self {
        ExitState { success: status.success(), code: status.code() }
    }
}

impl fmt::Display for ExitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status: {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Output of a captured launch, decoded lossily as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub status: ExitState,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        CapturedOutput { status: ExitState::ok(), stdout: stdout.into(), stderr: stderr.into() }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CapturedOutput { status: ExitState::code(code), stdout: String::new(), stderr: stderr.into() }
    }
}

/// Launches engine invocations. Calls block until the child exits.
///
/// An `Err` means the child could not be started at all; a child that started and
/// failed is reported through `ExitState`.
pub trait Engine: Send + Sync {
    /// Run with stdout and stderr captured.
    fn capture(
        &self,
        invocation: &Invocation,
        env: &EngineEnvironment,
    ) -> std::io::Result<CapturedOutput>;

    /// Run with stdio inherited from the driver.
    fn passthrough(
        &self,
        invocation: &Invocation,
        env: &EngineEnvironment,
    ) -> std::io::Result<ExitState>;
}
