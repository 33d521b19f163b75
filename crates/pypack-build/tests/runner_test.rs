//! End-to-end runner tests against a fake packaging tool
//!
//! The fake tool is a shell script that accepts the `--version` probe and
//! then replays canned pyinstaller-style output with a chosen exit code.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use pypack_build::{event_channel, BuildError, JobRunner};
use pypack_config::JobConfig;
use pypack_core::event::{LogEvent, ProgressEvent};
use pypack_core::OutputFormat;
use tempfile::TempDir;

fn job_config(temp_dir: &TempDir) -> JobConfig {
    let source = temp_dir.path().join("app.py");
    std::fs::write(&source, "print('hi')\n").unwrap();

    let output = temp_dir.path().join("out");
    std::fs::create_dir_all(&output).unwrap();

    JobConfig::new(source, OutputFormat::Exe, output)
}

fn fake_tool(temp_dir: &TempDir, body: &str) -> PathBuf {
    let path = temp_dir.path().join("fake-pyinstaller");
    let script = format!("#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then exit 0; fi\n{body}\n");
    std::fs::write(&path, script).unwrap();

    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();

    path
}

async fn run_job(tool: PathBuf, config: JobConfig) -> (
    Result<pypack_core::event::JobResult, BuildError>,
    Vec<LogEvent>,
    Vec<ProgressEvent>,
) {
    let (channel, mut receiver) = event_channel();
    let runner = JobRunner::with_tool(tool.to_string_lossy().into_owned(), config, channel);
    let outcome = runner.run().await;
    (outcome, receiver.drain_logs(), receiver.drain_progress())
}

#[tokio::test]
async fn successful_job_emits_stage_progression() {
    let temp_dir = TempDir::new().unwrap();
    let config = job_config(&temp_dir);
    let tool = fake_tool(
        &temp_dir,
        "echo 'Analyzing imports'\n\
         echo 'collecting submodules'\n\
         echo '5/10 steps'\n\
         echo '10/10 steps'\n\
         echo 'completed successfully'\n\
         exit 0",
    );

    let (outcome, logs, progress) = run_job(tool, config).await;

    let result = outcome.unwrap();
    assert!(result.succeeded);
    assert_eq!(result.exit_code, 0);

    let texts: Vec<&str> = logs.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Analyzing imports",
            "collecting submodules",
            "5/10 steps",
            "10/10 steps",
            "completed successfully",
        ]
    );

    let values: Vec<f64> = progress.iter().map(|p| p.progress).collect();
    assert_eq!(values, [15.0, 40.0, 50.0, 70.0, 75.0, 100.0]);
    assert_eq!(progress.last().unwrap().stage_label.as_deref(), Some("完成"));
}

#[tokio::test]
async fn failing_job_surfaces_exit_code_and_one_terminal_event() {
    let temp_dir = TempDir::new().unwrap();
    let config = job_config(&temp_dir);
    let tool = fake_tool(&temp_dir, "echo 'Analyzing app.py'\nexit 1");

    let (outcome, logs, progress) = run_job(tool, config).await;

    let result = outcome.unwrap();
    assert!(!result.succeeded);
    assert_eq!(result.exit_code, 1);

    assert_eq!(logs.len(), 1);
    let terminal_events = progress.iter().filter(|p| p.progress == 100.0).count();
    assert_eq!(terminal_events, 1);
}

#[tokio::test]
async fn missing_tool_short_circuits_before_any_job_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = job_config(&temp_dir);
    let tool = temp_dir.path().join("does-not-exist");

    let (outcome, logs, progress) = run_job(tool, config).await;

    assert!(matches!(outcome, Err(BuildError::ToolMissing { .. })));
    assert!(logs.is_empty());

    // The completion guard still retires the presentation layer.
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].progress, 100.0);
}

#[tokio::test]
async fn failing_version_probe_counts_as_missing_tool() {
    let temp_dir = TempDir::new().unwrap();
    let config = job_config(&temp_dir);

    let tool = temp_dir.path().join("broken-pyinstaller");
    std::fs::write(&tool, "#!/bin/sh\nexit 1\n").unwrap();
    let mut permissions = std::fs::metadata(&tool).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&tool, permissions).unwrap();

    let (outcome, logs, _progress) = run_job(tool, config).await;

    assert!(matches!(outcome, Err(BuildError::ToolMissing { .. })));
    assert!(logs.is_empty());
}

#[tokio::test]
async fn unmatched_lines_produce_log_events_only() {
    let temp_dir = TempDir::new().unwrap();
    let config = job_config(&temp_dir);
    let tool = fake_tool(&temp_dir, "echo 'hello from the bootloader'\nexit 0");

    let (outcome, logs, progress) = run_job(tool, config).await;

    assert!(outcome.unwrap().succeeded);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].text, "hello from the bootloader");

    // Only the terminal completion event.
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].progress, 100.0);
}

#[tokio::test]
async fn stderr_lines_are_classified_like_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let config = job_config(&temp_dir);
    let tool = fake_tool(&temp_dir, "echo 'Analyzing imports' >&2\nexit 0");

    let (outcome, logs, progress) = run_job(tool, config).await;

    assert!(outcome.unwrap().succeeded);
    assert_eq!(logs.len(), 1);
    assert_eq!(progress[0].progress, 15.0);
    assert_eq!(progress[0].stage_label.as_deref(), Some("分析依赖"));
}

#[tokio::test]
async fn unsupported_format_never_spawns_the_tool() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = job_config(&temp_dir);
    config.format = OutputFormat::Apk;

    // A tool that would fail loudly if it were ever invoked.
    let tool = fake_tool(&temp_dir, "echo 'should never run'\nexit 99");

    let (outcome, logs, progress) = run_job(tool, config).await;

    assert!(matches!(outcome, Err(BuildError::UnsupportedFormat { .. })));
    assert!(logs.is_empty());
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].progress, 100.0);
}

#[tokio::test]
async fn invalid_config_is_rejected_before_probing() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = job_config(&temp_dir);
    config.source_file = temp_dir.path().join("missing.py");

    let tool = fake_tool(&temp_dir, "exit 0");

    let (outcome, logs, progress) = run_job(tool, config).await;

    assert!(matches!(outcome, Err(BuildError::Config(_))));
    assert!(logs.is_empty());
    assert_eq!(progress.len(), 1);
}
