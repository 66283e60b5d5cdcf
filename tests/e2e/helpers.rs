//! Test helper functions for E2E tests
//!
//! Everything here drives the compiled `universal-ci` binary or prepares
//! git repository fixtures for it to run against.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use universal_ci::CONFIG_FILE_NAME;

/// Path of the compiled binary under test
pub fn bin_path() -> &'static str {
    env!("CARGO_BIN_EXE_universal-ci")
}

/// Run the binary with `args` in `cwd` and capture its output
pub fn run_cli(args: &[&str], cwd: &Path) -> Output {
    Command::new(bin_path())
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run universal-ci binary")
}

/// `PATH` with the binary's directory prepended, for processes (git hooks)
/// that invoke `universal-ci` by name
pub fn path_with_bin() -> String {
    let bin_dir = Path::new(bin_path())
        .parent()
        .expect("Binary path should have a parent directory");
    match std::env::var("PATH") {
        Ok(path) => format!("{}:{}", bin_dir.display(), path),
        Err(_) => bin_dir.display().to_string(),
    }
}

/// Captured stdout as a lossy string
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Captured stderr as a lossy string
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write a task-list document into `dir` under the fixed name
pub fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, text).expect("Failed to write config fixture");
    path
}

/// Run git with hook-friendly settings: the binary's directory is on PATH
/// so installed shims can find `universal-ci`
pub fn run_git(args: &[&str], cwd: &Path) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("PATH", path_with_bin())
        .output()
        .expect("Failed to run git")
}

/// Creates a temporary git repository with initial commit
///
/// Returns a TempDir that must be kept in scope for the lifetime of the test
pub fn create_temp_git_repo() -> Result<TempDir> {
    let temp = TempDir::new().context("Failed to create temp directory")?;

    Command::new("git")
        .args(["init"])
        .current_dir(temp.path())
        .output()
        .context("Failed to run git init")?;

    Command::new("git")
        .args(["config", "user.email", "test@test.com"])
        .current_dir(temp.path())
        .output()
        .context("Failed to set git user.email")?;

    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(temp.path())
        .output()
        .context("Failed to set git user.name")?;

    fs::write(temp.path().join("README.md"), "# Test Repository\n")
        .context("Failed to write README.md")?;

    Command::new("git")
        .args(["add", "."])
        .current_dir(temp.path())
        .output()
        .context("Failed to git add")?;

    Command::new("git")
        .args(["commit", "-m", "Initial commit"])
        .current_dir(temp.path())
        .output()
        .context("Failed to git commit")?;

    Ok(temp)
}

/// Stage a new file so the repository has something to commit
pub fn stage_new_file(repo: &Path, filename: &str) {
    fs::write(repo.join(filename), "content\n").expect("Failed to write file");
    run_git(&["add", filename], repo);
}
