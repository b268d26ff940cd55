//! Full runs against a mock chat endpoint, through the library and the binary

mod common;

use std::fs;
use std::process::Command;

use common::{chart_lines, chat_body, write_dataset, PAIR_PLAN, CHAT_PATH};
use httpmock::prelude::*;
use insight::llm::LlmError;
use insight::pipeline::{run, Config, NarrativeStatus, PipelineError, REPORT_FILE_NAME, TOKEN_ENV};
use tempfile::TempDir;

fn insight_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_insight"));
    cmd.env_remove("LLM_MODEL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_report_has_baseline_and_planned_chart() -> anyhow::Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(CHAT_PATH)
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(chat_body(PAIR_PLAN));
    });

    let dir = TempDir::new()?;
    let config = Config::new(write_dataset(dir.path(), 100), "test-token")
        .with_api_url(server.url(CHAT_PATH))
        .with_output_dir(dir.path().join("people"));

    let summary = run(&config)?;

    mock.assert_calls(2);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.narrative, NarrativeStatus::Generated);

    let report = fs::read_to_string(&summary.report_path)?;
    let narrative = report.split("## Visualizations").next().unwrap_or_default();
    assert!(!narrative.trim().is_empty());

    let charts = chart_lines(&report);
    assert_eq!(charts.len(), 2);
    assert!(charts[0].contains("correlation_matrix_"));
    assert!(charts[1].contains("correlation_age_income_"));
    for path in &summary.artifacts {
        assert!(fs::read_to_string(path)?.contains("<svg"));
    }
    Ok(())
}

#[test]
fn test_plan_server_error_writes_no_report() -> anyhow::Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(500).body("Internal Server Error");
    });

    let dir = TempDir::new()?;
    let config = Config::new(write_dataset(dir.path(), 100), "test-token")
        .with_api_url(server.url(CHAT_PATH))
        .with_output_dir(dir.path().join("people"));

    let err = run(&config).unwrap_err();

    mock.assert();
    assert!(matches!(err, PipelineError::Plan(LlmError::Api { status: 500, .. })));
    assert!(!config.report_path().exists());
    Ok(())
}

#[test]
fn test_cli_without_dataset_prints_usage() -> anyhow::Result<()> {
    let output = insight_bin().env(TOKEN_ENV, "test-token").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    Ok(())
}

#[test]
fn test_cli_without_token_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let dataset = write_dataset(dir.path(), 10);

    let output = insight_bin()
        .current_dir(dir.path())
        .env_remove(TOKEN_ENV)
        .arg(&dataset)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(TOKEN_ENV));
    assert!(!dir.path().join("people").exists());
    Ok(())
}

#[test]
fn test_cli_help_succeeds() -> anyhow::Result<()> {
    let output = insight_bin().arg("--help").output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--attach-chart"));
    Ok(())
}

#[test]
fn test_cli_run_writes_report_in_default_directory() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(chat_body(PAIR_PLAN));
    });

    let dir = TempDir::new()?;
    let dataset = write_dataset(dir.path(), 100);

    let output = insight_bin()
        .current_dir(dir.path())
        .env(TOKEN_ENV, "test-token")
        .env("LLM_API_URL", server.url(CHAT_PATH))
        .arg(&dataset)
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report = fs::read_to_string(dir.path().join("people").join(REPORT_FILE_NAME))?;
    assert_eq!(chart_lines(&report).len(), 2);
    Ok(())
}

#[test]
fn test_cli_plan_failure_exits_nonzero() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(500);
    });

    let dir = TempDir::new()?;
    let dataset = write_dataset(dir.path(), 100);

    let output = insight_bin()
        .current_dir(dir.path())
        .env(TOKEN_ENV, "test-token")
        .env("LLM_API_URL", server.url(CHAT_PATH))
        .arg(&dataset)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("analysis plan"));
    assert!(!dir.path().join("people").join(REPORT_FILE_NAME).exists());
    Ok(())
}
