//! Git integration: repository discovery and hook installation.

pub mod hooks;

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Toplevel of the repository enclosing `dir`, as reported by
/// `git rev-parse --show-toplevel`.
///
/// Every failure mode (git binary absent, not a repository, non-zero exit)
/// collapses to `None`; callers treat that as "no repository" and move on.
pub fn repo_toplevel_from(dir: &Path) -> Option<PathBuf> {
    if which::which("git").is_err() {
        debug!("git binary not found, skipping toplevel lookup");
        return None;
    }
    run_git_checked(&["rev-parse", "--show-toplevel"], dir)
        .ok()
        .filter(|top| !top.is_empty())
        .map(PathBuf::from)
}

/// Repository root for hook installation: the nearest ancestor of the
/// current directory containing `.git`.
pub fn find_repo_root() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    find_repo_root_from(&current_dir)
}

pub fn find_repo_root_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(".git").exists() {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => bail!("Not in a git repository"),
        }
    }
}

fn run_git(args: &[&str], dir: &Path) -> Result<Output> {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to execute: git {}", args.join(" ")))
}

fn run_git_checked(args: &[&str], dir: &Path) -> Result<String> {
    let output = run_git(args, dir)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let cmd = args.first().unwrap_or(&"");
        bail!("git {cmd} failed: {stderr}");
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
