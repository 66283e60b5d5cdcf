//! Git hook shim installation.
//!
//! Two shims gate git operations: `pre-commit` runs the `test` stage,
//! `pre-push` runs the `release` stage. Each shim exits with the verifier's
//! status, which is the signal git acts on. The managed section is
//! delimited by markers so installation is idempotent and coexists with a
//! user's own hook content.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Markers delimiting the managed section of a hook file.
const HOOK_START_MARKER: &str = "# UNIVERSAL_CI_HOOK_START";
const HOOK_END_MARKER: &str = "# UNIVERSAL_CI_HOOK_END";

const PRE_COMMIT_CONTENT: &str = include_str!("../../hooks/pre-commit.sh");
const PRE_PUSH_CONTENT: &str = include_str!("../../hooks/pre-push.sh");

/// The two git hooks wired to verification stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    PreCommit,
    PrePush,
}

impl HookKind {
    pub const ALL: [HookKind; 2] = [HookKind::PreCommit, HookKind::PrePush];

    /// File name under `.git/hooks`.
    pub fn file_name(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "pre-commit",
            HookKind::PrePush => "pre-push",
        }
    }

    /// Stage the installed shim passes to the verifier.
    pub fn stage(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "test",
            HookKind::PrePush => "release",
        }
    }

    fn shim(&self) -> &'static str {
        match self {
            HookKind::PreCommit => PRE_COMMIT_CONTENT,
            HookKind::PrePush => PRE_PUSH_CONTENT,
        }
    }
}

/// Install one hook shim into the repository's `.git/hooks` directory.
///
/// An existing hook file is preserved: the managed section is appended to
/// it, and a stale managed section is replaced in place.
///
/// Returns `Ok(true)` when the hook was created or updated, `Ok(false)`
/// when it was already up to date.
pub fn install_hook(repo_root: &Path, kind: HookKind) -> Result<bool> {
    let hooks_dir = repo_root.join(".git/hooks");
    let hook_path = hooks_dir.join(kind.file_name());

    if !hooks_dir.exists() {
        fs::create_dir_all(&hooks_dir).with_context(|| {
            format!("Failed to create hooks directory: {}", hooks_dir.display())
        })?;
    }

    let section = extract_section(kind.shim());

    if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)
            .with_context(|| format!("Failed to read existing hook: {}", hook_path.display()))?;

        if existing.contains(HOOK_START_MARKER) {
            if extract_section(&existing).trim() == section.trim() {
                return Ok(false);
            }
            let updated = replace_section(&existing, &section);
            fs::write(&hook_path, updated)
                .with_context(|| format!("Failed to update hook: {}", hook_path.display()))?;
        } else {
            let updated = format!("{}\n\n{}\n", existing.trim_end(), section);
            fs::write(&hook_path, updated)
                .with_context(|| format!("Failed to append to hook: {}", hook_path.display()))?;
        }
    } else {
        let content = format!("#!/bin/sh\n\n{}\n", section);
        fs::write(&hook_path, content)
            .with_context(|| format!("Failed to create hook: {}", hook_path.display()))?;
    }

    make_executable(&hook_path)?;
    Ok(true)
}

/// Whether the managed section is present in the repository's hook file.
pub fn is_hook_installed(repo_root: &Path, kind: HookKind) -> bool {
    let hook_path = repo_root.join(".git/hooks").join(kind.file_name());
    match fs::read_to_string(&hook_path) {
        Ok(content) => content.contains(HOOK_START_MARKER),
        Err(_) => false,
    }
}

/// The marker-delimited span of a hook file, markers included. Falls back to
/// the whole content when the markers are absent.
fn extract_section(content: &str) -> String {
    match (content.find(HOOK_START_MARKER), content.find(HOOK_END_MARKER)) {
        (Some(start), Some(end)) => content[start..end + HOOK_END_MARKER.len()].to_string(),
        _ => content.to_string(),
    }
}

fn replace_section(existing: &str, new_section: &str) -> String {
    match (existing.find(HOOK_START_MARKER), existing.find(HOOK_END_MARKER)) {
        (Some(start), Some(end)) => {
            let before = &existing[..start];
            let after = &existing[end + HOOK_END_MARKER.len()..];
            format!("{}{}{}", before, new_section, after)
        }
        _ => format!("{}\n\n{}", existing.trim_end(), new_section),
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_context(|| format!("Failed to stat hook: {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("Failed to set permissions on hook: {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
