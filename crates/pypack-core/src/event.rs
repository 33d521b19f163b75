//! Events carried from the packaging worker to the presentation layer

use serde::{Deserialize, Serialize};

/// Progress update for the current job
///
/// One event is published for every classified output line and exactly one
/// terminal event (progress 100) is published when the job finishes, on
/// every path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Overall progress, 0-100
    pub progress: f64,
    /// Display label of the stage that produced this update
    pub stage_label: Option<String>,
}

impl ProgressEvent {
    /// Create a progress event with a stage label
    pub fn new(progress: f64, stage_label: impl Into<String>) -> Self {
        Self { progress, stage_label: Some(stage_label.into()) }
    }
}

/// One raw line of packaging tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Trimmed line text
    pub text: String,
}

impl LogEvent {
    /// Create a log event from a line of output
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Final outcome of a packaging job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Exit code reported by the packaging tool
    pub exit_code: i32,
    /// Whether the tool exited with code 0
    pub succeeded: bool,
}

impl JobResult {
    /// Build a result from a raw exit code
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self { exit_code, succeeded: exit_code == 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_result_from_exit_code() {
        let ok = JobResult::from_exit_code(0);
        assert!(ok.succeeded);
        assert_eq!(ok.exit_code, 0);

        let failed = JobResult::from_exit_code(1);
        assert!(!failed.succeeded);
        assert_eq!(failed.exit_code, 1);
    }

    #[test]
    fn progress_event_round_trips_through_json() {
        let event = ProgressEvent::new(42.0, "构建可执行文件");
        let json = serde_json::to_string(&event).unwrap();
        let back: ProgressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
