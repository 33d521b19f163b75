//! Package command implementation
//!
//! Plays the presentation-shell role: validates the three user inputs,
//! spawns the worker task, and polls the event channel on a fixed timer to
//! drive an indicatif progress bar plus a scrolling log.

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use pypack_build::{event_channel, BuildError, EventReceiver, JobRunner};
use pypack_config::JobConfig;
use pypack_core::OutputFormat;
use tracing::info;

/// How often the presentation loop drains the event channel
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Package command implementation
pub struct PackageCommand {
    source: PathBuf,
    format: OutputFormat,
    output: PathBuf,
    allow_any_extension: bool,
    tool: String,
}

impl PackageCommand {
    pub fn new(
        source: PathBuf,
        format: OutputFormat,
        output: PathBuf,
        allow_any_extension: bool,
        tool: String,
    ) -> Self {
        Self { source, format, output, allow_any_extension, tool }
    }

    pub async fn execute(&self) -> Result<()> {
        let mut config = JobConfig::new(self.source.clone(), self.format, self.output.clone());
        config.allow_any_extension = self.allow_any_extension;
        config.validate()?;

        match self.format {
            OutputFormat::Exe => {}
            OutputFormat::Apk => {
                // Reported, never launched.
                println!("APK packaging requires an Android build environment and is not yet available.");
                return Ok(());
            }
            OutputFormat::Other => {
                return Err(BuildError::UnsupportedFormat { format: self.format.to_string() }.into());
            }
        }

        println!("✓ Inputs validated");
        info!("Source file: {}", config.source_file.display());
        info!("Output directory: {}", config.output_dir.display());

        let (channel, mut receiver) = event_channel();
        let runner = JobRunner::with_tool(self.tool.clone(), config, channel);
        let worker = tokio::spawn(runner.run());

        let bar = progress_bar();
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            drain_into_bar(&mut receiver, &bar);
            if worker.is_finished() {
                break;
            }
        }
        // The terminal event may land between the last tick and the worker
        // finishing; pick up the stragglers.
        drain_into_bar(&mut receiver, &bar);
        bar.finish();

        let outcome = worker
            .await
            .map_err(|e| color_eyre::eyre::eyre!("packaging worker panicked: {e}"))?;

        match outcome {
            Ok(result) if result.succeeded => {
                println!("\n✨ Packaging completed! Output written to: {}", self.output.display());
                Ok(())
            }
            Ok(result) => {
                eprintln!("\nPackaging failed with exit code {}.", result.exit_code);
                eprintln!("The collected log lines above show the tool's output.");
                Err(BuildError::JobFailed { code: result.exit_code }.into())
            }
            Err(e) if e.is_tool_missing() => {
                eprintln!("\n{} is not installed. Install it with:", self.tool);
                eprintln!("    pip install pyinstaller");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{wide_bar:.cyan/blue}] {pos:>3}/100 {msg}")
            .expect("Valid template")
            .progress_chars("#>-"),
    );
    bar
}

/// Apply everything currently queued: log lines scroll above the bar,
/// progress events move the bar and update the stage label.
fn drain_into_bar(receiver: &mut EventReceiver, bar: &ProgressBar) {
    for log in receiver.drain_logs() {
        bar.println(log.text);
    }
    for event in receiver.drain_progress() {
        bar.set_position(event.progress.round() as u64);
        if let Some(label) = event.stage_label {
            bar.set_message(label);
        }
    }
}
