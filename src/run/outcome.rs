use std::fmt;

use crate::engine::{ExitState, Invocation};

use super::spec::PERFORMANCE_LABEL;

/// The `Performance:` line of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Throughput {
    /// The line exactly as mdrun printed it
    pub line: String,
    pub ns_per_day: Option<f64>,
    pub hour_per_ns: Option<f64>,
}

impl Throughput {
    /// Wrap a throughput line, picking up the two numbers after the label when present.
    pub fn from_line(line: &str) -> Self {
        let mut figures = line
            .split_once(PERFORMANCE_LABEL)
            .map(|(_, rest)| rest)
            .unwrap_or("")
            .split_whitespace()
            .filter_map(|tok| tok.parse::<f64>().ok());
        Throughput {
            line: line.to_string(),
            ns_per_day: figures.next(),
            hour_per_ns: figures.next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The process could not be started
    Spawn(String),
    /// The process exited unsuccessfully
    Exit(ExitState),
    /// The run finished but printed no throughput line
    MetricNotFound,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Spawn(msg) => write!(f, "failed to start: {msg}"),
            FailureReason::Exit(status) => write!(f, "{status}"),
            FailureReason::MetricNotFound => {
                write!(f, "metric not found (no `{PERFORMANCE_LABEL}` line in output)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Success(Throughput),
    Failure { invocation: Invocation, reason: FailureReason },
}
