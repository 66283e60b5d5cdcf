//! Hook shim management: install the shims and report their state.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::git::{self, hooks::HookKind};

/// Install both shims into the enclosing repository's `.git/hooks`.
pub fn install() -> Result<()> {
    let repo_root = git::find_repo_root().context("Not in a git repository")?;

    println!("Installing git hooks...\n");
    for kind in HookKind::ALL {
        let changed = git::hooks::install_hook(&repo_root, kind)?;
        if changed {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                kind.file_name(),
                format!("(runs `universal-ci verify --stage {}`)", kind.stage()).dimmed()
            );
        } else {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                kind.file_name(),
                "already up to date".dimmed()
            );
        }
    }

    println!();
    println!(
        "Failing verification now blocks {} and {}.",
        "git commit".bold(),
        "git push".bold()
    );
    Ok(())
}

/// Report per-hook installed state.
pub fn status() -> Result<()> {
    let repo_root = git::find_repo_root().context("Not in a git repository")?;

    println!("Hook status for {}:\n", repo_root.display());

    let mut missing = false;
    for kind in HookKind::ALL {
        if git::hooks::is_hook_installed(&repo_root, kind) {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                kind.file_name(),
                format!("(stage: {})", kind.stage()).dimmed()
            );
        } else {
            missing = true;
            println!(
                "  {} {} {}",
                "✗".red().bold(),
                kind.file_name(),
                "not installed".dimmed()
            );
        }
    }

    if missing {
        println!();
        println!(
            "Run {} to install the missing hooks.",
            "universal-ci hooks install".cyan()
        );
    }
    Ok(())
}
