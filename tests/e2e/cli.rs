//! E2E tests for the verification entry point
//!
//! These tests run the compiled binary the way a human or a git hook would:
//! real process, real exit codes, captured output. The exit code assertions
//! matter most, since that code is the only signal git ever sees.

use std::process::Command;

use tempfile::TempDir;

use super::helpers::*;

const PASSING: &str = r#"{"tasks": [
    {"name": "Greeter", "working_directory": ".", "command": "echo hello"}
]}"#;

const ONE_FAILURE: &str = r#"{"tasks": [
    {"name": "First", "working_directory": ".", "command": "exit 0"},
    {"name": "Second", "working_directory": ".", "command": "exit 1"}
]}"#;

/// Test: --help carries the identifying phrase external tooling probes for
#[test]
fn test_help_contains_identifying_phrase() {
    let temp = TempDir::new().unwrap();

    let output = run_cli(&["--help"], temp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("Universal CI Verifier"));
}

/// Test: Bare invocation with a passing config exits 0
#[test]
fn test_all_passing_config_exits_zero() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), PASSING);

    let output = run_cli(&[], temp.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Greeter"));
    assert!(stdout.contains("All tasks passed"));
}

/// Test: The explicit verify subcommand behaves like the bare invocation
#[test]
fn test_verify_subcommand_matches_bare_invocation() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), PASSING);

    let output = run_cli(&["verify"], temp.path());

    assert_eq!(output.status.code(), Some(0));
}

/// Test: One failing task fails the run and only that task is in the summary
#[test]
fn test_failing_task_exits_one_and_summary_names_it() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), ONE_FAILURE);

    let output = run_cli(&[], temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    let summary = &stdout[stdout.find("Summary").expect("Should print a summary")..];
    assert!(summary.contains("Second"));
    assert!(!summary.contains("First"));
}

/// Test: An explicit --config path wins over the file the search would find
#[test]
fn test_explicit_config_beats_search() {
    let temp = TempDir::new().unwrap();
    // the searchable config fails, the explicit one passes
    write_config(
        temp.path(),
        r#"{"tasks": [{"name": "Trap", "working_directory": ".", "command": "exit 1"}]}"#,
    );
    let custom = temp.path().join("custom.json");
    std::fs::write(&custom, PASSING).unwrap();

    let output = run_cli(&["--config", "custom.json"], temp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout_of(&output).contains("Trap"));
}

/// Test: --stage runs only matching and untagged tasks
#[test]
fn test_stage_filter_selects_matching_tasks() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"{"tasks": [
            {"name": "Tests", "working_directory": ".", "command": "touch test.ran", "stage": "test"},
            {"name": "Release", "working_directory": ".", "command": "touch release.ran", "stage": "release"},
            {"name": "Always", "working_directory": ".", "command": "touch always.ran"}
        ]}"#,
    );

    let output = run_cli(&["--stage", "test"], temp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(temp.path().join("test.ran").exists());
    assert!(temp.path().join("always.ran").exists());
    assert!(!temp.path().join("release.ran").exists());
}

/// Test: A stage that selects nothing is a vacuous pass
#[test]
fn test_stage_with_no_tasks_is_vacuous_pass() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"{"tasks": [{"name": "A", "working_directory": ".", "command": "exit 0", "stage": "test"}]}"#,
    );

    let test_run = run_cli(&["--stage", "test"], temp.path());
    assert_eq!(test_run.status.code(), Some(0));

    let release_run = run_cli(&["--stage", "release"], temp.path());
    assert_eq!(release_run.status.code(), Some(0));
    assert!(stdout_of(&release_run).contains("no tasks tagged for stage release"));
}

/// Test: A task with a missing directory is reported skipped, not failed
#[test]
fn test_missing_directory_reports_skipped() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"{"tasks": [{"name": "Ghost", "working_directory": "gone", "command": "exit 1"}]}"#,
    );

    let output = run_cli(&[], temp.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("skipped"));
}

/// Test: Missing config exits non-zero and prints the attempted locations
#[test]
fn test_missing_config_prints_search_locations() {
    let temp = TempDir::new().unwrap();

    let output = run_cli(&[], temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("universal-ci.config.json"));
    assert!(stderr.contains("searched"));
    assert!(stderr.contains(&temp.path().display().to_string()));
}

/// Test: Malformed config is fatal and names the offending entry
#[test]
fn test_malformed_config_exits_one_with_entry_index() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), r#"{"tasks": [{"name": "No command here"}]}"#);

    let output = run_cli(&[], temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("tasks[0]"));
    assert!(stderr.contains("command"));
}

/// Test: Environment phrasing follows the GITHUB_ACTIONS marker
#[test]
fn test_environment_banner_phrasing() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), PASSING);

    let local = Command::new(bin_path())
        .current_dir(temp.path())
        .env_remove("GITHUB_ACTIONS")
        .output()
        .expect("Failed to run universal-ci binary");
    assert!(stdout_of(&local).contains("Local Shell"));

    let actions = Command::new(bin_path())
        .current_dir(temp.path())
        .env("GITHUB_ACTIONS", "true")
        .output()
        .expect("Failed to run universal-ci binary");
    assert!(stdout_of(&actions).contains("GitHub Actions"));
    // phrasing only: the run still passes either way
    assert_eq!(local.status.code(), Some(0));
    assert_eq!(actions.status.code(), Some(0));
}

/// Test: Completions are generated for supported shells and refused for others
#[test]
fn test_completions_generation() {
    let temp = TempDir::new().unwrap();

    let bash = run_cli(&["completions", "bash"], temp.path());
    assert_eq!(bash.status.code(), Some(0));
    assert!(stdout_of(&bash).contains("universal-ci"));

    let unsupported = run_cli(&["completions", "powershell"], temp.path());
    assert_ne!(unsupported.status.code(), Some(0));
    assert!(stderr_of(&unsupported).contains("Unsupported shell"));
}
