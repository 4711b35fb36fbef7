//! End-to-end runs of the `termline` binary.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

fn termline() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_termline"));
    cmd.env_remove("TERMLINE_CONFIG");
    cmd.env_remove("NO_COLOR");
    cmd
}

fn run(args: &[&str]) -> Output {
    termline().args(args).output().expect("failed to run termline")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file
}

#[test]
fn test_help_command() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_version_command() {
    let output = run(&["--version"]);
    assert!(output.status.success());
}

#[test]
fn test_log_plain_when_piped() {
    let output = run(&["--no-color", "log", "info", "hello"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "➔ hello\n");
}

#[test]
fn test_piped_output_is_uncolored_by_default() {
    let output = run(&["log", "info", "hello"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "➔ hello\n");
}

#[test]
fn test_no_color_env() {
    let output = termline()
        .env("NO_COLOR", "1")
        .args(["log", "warn", "careful"])
        .output()
        .expect("failed to run termline");

    assert_eq!(stdout(&output), "! careful\n");
}

#[test]
fn test_debug_needs_flag() {
    let hidden = run(&["--no-color", "log", "debug", "details"]);
    assert_eq!(stdout(&hidden), "");

    let shown = run(&["--no-color", "--debug", "log", "debug", "details"]);
    assert_eq!(stdout(&shown), "? details\n");
}

#[test]
fn test_quiet_prints_nothing() {
    let output = run(&["--quiet", "log", "error", "boom"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_quiet_still_reports_errors() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("missing.json");

    let output = run(&["--quiet", "table", path.to_str().expect("utf-8 temp path")]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let err = stderr(&output);
    assert!(err.contains("failed to read"));
    assert!(err.contains("missing.json"));
    assert!(!err.contains('\x1b'));
}

#[test]
fn test_config_file() {
    let config = file_with("debug = true\ncolor = false\n");
    let path = config.path().to_str().expect("utf-8 temp path");

    let output = run(&["--config", path, "log", "debug", "from file"]);

    assert_eq!(stdout(&output), "? from file\n");
}

#[test]
fn test_config_from_env() {
    let config = file_with("quiet = true\n");

    let output = termline()
        .env("TERMLINE_CONFIG", config.path())
        .args(["log", "info", "hidden"])
        .output()
        .expect("failed to run termline");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_config_fails() {
    let config = file_with("quiet = \"very\"\n");
    let path = config.path().to_str().expect("utf-8 temp path");

    let output = run(&["--config", path, "log", "info", "x"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to parse settings"));
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("nope.toml");

    let output = run(&["--config", path.to_str().expect("utf-8 temp path"), "log", "info", "x"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope.toml"));
}

#[test]
fn test_spin_success() {
    let output = run(&["--no-color", "spin", "fetching", "--millis", "10"]);

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("✔ fetching\n"));
}

#[test]
fn test_spin_fail_with_detail() {
    let output = run(&[
        "--no-color", "spin", "fetching", "--millis", "10", "--fail", "--detail", "timeout",
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("✘ fetching: timeout\n"));
}

#[test]
fn test_progress_walk() {
    let output = run(&[
        "--no-color",
        "progress",
        "--steps",
        "4",
        "--bar-length",
        "8",
        "--numeric",
        "--millis",
        "1",
    ]);

    let out = stdout(&output);
    assert!(output.status.success());
    assert!(out.starts_with("Working\n"));
    assert!(out.contains("[▓▓░░░░░░](1/4)"));
    assert!(out.contains("[▓▓▓▓▓▓▓▓](4/4)"));
    assert!(out.ends_with("✔ Working: done\n"));
}

#[test]
fn test_progress_without_bar() {
    let output = run(&["--no-color", "--no-progress", "progress", "--steps", "2", "--millis", "1"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Working\n");
}

#[test]
fn test_table_from_json() {
    let data = file_with(r#"[{"name": "jq", "size": 12}, {"name": "ripgrep"}]"#);
    let path = data.path().to_str().expect("utf-8 temp path");

    let output = run(&["table", path]);

    let out = stdout(&output);
    assert!(output.status.success());
    assert!(out.starts_with("╔═════════╦══════╗\n"));
    assert!(out.contains("║ jq      ║ 12   ║"));
    assert!(out.contains("║ ripgrep ║      ║"));
    assert!(out.ends_with("╚═════════╩══════╝\n"));
}

#[test]
fn test_table_column_selection() {
    let data = file_with(r#"[{"name": "jq", "size": 12}]"#);
    let path = data.path().to_str().expect("utf-8 temp path");

    let output = run(&["table", path, "--columns", "size"]);

    let out = stdout(&output);
    assert!(out.contains("║ 12   ║"));
    assert!(!out.contains("jq"));
}

#[test]
fn test_table_rejects_non_array() {
    let data = file_with(r#"{"name": "jq"}"#);
    let path = data.path().to_str().expect("utf-8 temp path");

    let output = run(&["table", path]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not a JSON array of objects"));
}
