//! Packaging job execution
//!
//! A single worker drives one job end to end: probe the tool, spawn it with
//! piped output, stream lines through the classifier into the accumulator,
//! and publish events on the channel. Exactly one terminal progress event
//! (progress 100) is published on every exit path.

use std::process::Stdio;

use futures::StreamExt;
use pypack_config::JobConfig;
use pypack_core::event::JobResult;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, warn};

use crate::{
    channel::EventChannel,
    classifier::StageClassifier,
    error::{BuildError, Result},
    progress::ProgressAccumulator,
};

/// Default packaging tool invoked by the runner
pub const DEFAULT_TOOL: &str = "pyinstaller";

/// Lifecycle of a packaging job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Not started
    Idle,
    /// Checking that the tool is invocable
    ProbingTool,
    /// Streaming child output
    Running,
    /// Tool exited with code 0
    Succeeded,
    /// Tool exited nonzero, or streaming failed
    Failed,
    /// The probe found no usable tool
    ToolMissing,
}

/// Runs one packaging job
///
/// `run` consumes the runner, so a runner can never be reused for a second
/// job; only one job is ever in flight per runner.
pub struct JobRunner {
    tool: String,
    config: JobConfig,
    classifier: StageClassifier,
    accumulator: ProgressAccumulator,
    channel: EventChannel,
    state: RunnerState,
}

impl JobRunner {
    /// Create a runner for the default tool
    pub fn new(config: JobConfig, channel: EventChannel) -> Self {
        Self::with_tool(DEFAULT_TOOL, config, channel)
    }

    /// Create a runner invoking a specific tool binary
    pub fn with_tool(tool: impl Into<String>, config: JobConfig, channel: EventChannel) -> Self {
        Self {
            tool: tool.into(),
            config,
            classifier: StageClassifier::new(),
            accumulator: ProgressAccumulator::new(),
            channel,
            state: RunnerState::Idle,
        }
    }

    /// Probe the tool, launch the job and stream its output to completion
    pub async fn run(mut self) -> Result<JobResult> {
        let outcome = self.execute().await;

        // Completion guard: the terminal event fires on success, job
        // failure, probe failure and stream errors alike, exactly once.
        let terminal = self.accumulator.complete();
        self.channel.push_progress(terminal);

        let final_state = match &outcome {
            Ok(result) if result.succeeded => RunnerState::Succeeded,
            Ok(_) => RunnerState::Failed,
            Err(e) if e.is_tool_missing() => RunnerState::ToolMissing,
            Err(_) => RunnerState::Failed,
        };
        self.transition(final_state);

        outcome
    }

    async fn execute(&mut self) -> Result<JobResult> {
        if !self.config.format.is_supported() {
            return Err(BuildError::UnsupportedFormat {
                format: self.config.format.to_string(),
            });
        }
        self.config.validate()?;

        self.transition(RunnerState::ProbingTool);
        probe(&self.tool).await?;

        self.transition(RunnerState::Running);
        match self.stream_job().await {
            Ok(result) => Ok(result),
            Err(e) => {
                // Never let a streaming failure escape silently; it shows
                // up in the log pane like any other line.
                self.channel.push_log(format!("打包异常：{e}"));
                Err(e)
            }
        }
    }

    async fn stream_job(&mut self) -> Result<JobResult> {
        let mut child = Command::new(&self.tool)
            .arg("--onefile")
            .arg("--distpath")
            .arg(self.config.dist_dir())
            .arg("--workpath")
            .arg(self.config.work_dir())
            .arg("--specpath")
            .arg(self.config.spec_dir())
            .arg("--clean")
            .arg(&self.config.source_file)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Cleanup guarantee for early-error paths: an abandoned child
            // is killed rather than leaked.
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BuildError::stream("child stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BuildError::stream("child stderr was not captured"))?;

        // Merge the two pipes into one line stream. Each pipe stays FIFO;
        // interleaving between the two is arbitrary.
        let stdout_lines = LinesStream::new(BufReader::new(stdout).lines());
        let stderr_lines = LinesStream::new(BufReader::new(stderr).lines());
        let mut lines = futures::stream::select(stdout_lines, stderr_lines);

        while let Some(line) = lines.next().await {
            let line = line?;
            self.handle_line(&line);
        }

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);
        let result = JobResult::from_exit_code(exit_code);

        if result.succeeded {
            info!(tool = %self.tool, "packaging job succeeded");
        } else {
            warn!(tool = %self.tool, exit_code, "packaging job failed");
        }

        Ok(result)
    }

    /// Publish one line: always a log event, plus a progress event when a
    /// stage pattern matches.
    fn handle_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        self.channel.push_log(trimmed);

        if let Some(classification) = self.classifier.classify(trimmed) {
            debug!(stage = classification.label(), "classified output line");
            let event = self.accumulator.apply(&classification);
            self.channel.push_progress(event);
        }
    }

    fn transition(&mut self, next: RunnerState) {
        debug!(from = ?self.state, to = ?next, "runner state");
        self.state = next;
    }
}

/// Check that the packaging tool is invocable, without starting a job
///
/// Any launch failure or nonzero `--version` exit maps to
/// [`BuildError::ToolMissing`]; the underlying cause is only logged.
pub async fn probe(tool: &str) -> Result<()> {
    let status = Command::new(tool)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            debug!(%tool, ?status, "tool probe exited nonzero");
            Err(BuildError::ToolMissing { tool: tool.to_string() })
        }
        Err(e) => {
            debug!(%tool, error = %e, "tool probe failed to launch");
            Err(BuildError::ToolMissing { tool: tool.to_string() })
        }
    }
}
