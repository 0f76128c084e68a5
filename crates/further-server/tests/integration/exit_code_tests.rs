use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn run_api(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_api"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("POSTGRES_URL")
        .output()
        .expect("Failed to run api binary")
}

fn dir_with_settings() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "# no overrides\n").unwrap();
    dir
}

/// Structured log lines written to stdout.
fn log_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

fn fatal_kind(output: &Output) -> Option<String> {
    log_lines(output)
        .into_iter()
        .find(|line| line["message"] == "fatal")
        .and_then(|line| line["error.kind"].as_str().map(str::to_string))
}

#[test]
fn missing_settings_file_exits_with_failure() {
    let dir = TempDir::new().unwrap();

    let output = run_api(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fatal_kind(&output).as_deref(), Some("missing_settings_source"));
    let fatal = log_lines(&output)
        .into_iter()
        .find(|line| line["message"] == "fatal")
        .unwrap();
    assert_eq!(fatal["level"], "ERROR");
    assert!(fatal["error"].as_str().unwrap().contains(".env"));
}

#[test]
fn help_exits_successfully() {
    let dir = dir_with_settings();

    let output = run_api(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--db-dsn"));
    assert_eq!(fatal_kind(&output), None);
}

#[test]
fn version_exits_successfully() {
    let dir = dir_with_settings();

    let output = run_api(dir.path(), &["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains(further_core::VERSION));
}

#[test]
fn malformed_flag_exits_with_failure() {
    let dir = dir_with_settings();

    let output = run_api(dir.path(), &["--port=not-a-port"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fatal_kind(&output).as_deref(), Some("invalid_flag"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--port"));
}

#[test]
fn bad_idle_time_exits_before_connecting() {
    let dir = dir_with_settings();

    let output = run_api(
        dir.path(),
        &[
            "--db-dsn=postgres://postgres@127.0.0.1:1/further",
            "--db-max-idle-time=15x",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fatal_kind(&output).as_deref(), Some("invalid_duration_format"));
}
