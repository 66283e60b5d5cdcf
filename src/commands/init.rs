//! Project initialization: detect ecosystems, write the task list, install
//! the git hook shims.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::config::render_document;
use crate::detect;
use crate::git::{self, hooks::HookKind};
use crate::CONFIG_FILE_NAME;

/// Generate `universal-ci.config.json` for the project in the current
/// directory and wire up the git hooks.
///
/// A tree without any recognized markers still gets a config: the scan
/// falls back to a generic placeholder task for the user to edit. Refusing
/// to overwrite an existing config is fatal; hook installation is not, so
/// `init` still produces a usable config in a plain directory without
/// `.git`.
pub fn execute(force: bool) -> Result<()> {
    let root = env::current_dir().context("Failed to get current directory")?;

    print_header();

    println!("\n{}", "Detect".bold());
    println!("{}", "─".repeat(40).dimmed());

    let found = detect::scan_project(&root);
    for (dir, ecosystem) in &found {
        if *ecosystem == detect::Ecosystem::Generic {
            println!(
                "  {} no project markers found, using a generic placeholder task",
                "!".yellow().bold()
            );
        } else {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                ecosystem,
                format!("({dir})").dimmed()
            );
        }
    }

    println!("\n{}", "Configure".bold());
    println!("{}", "─".repeat(40).dimmed());

    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        bail!("{CONFIG_FILE_NAME} already exists (pass --force to overwrite)");
    }

    let tasks = detect::tasks_for(&found);
    let document = render_document(&tasks).context("Failed to render task list")?;
    fs::write(&config_path, document)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "  {} {} written {}",
        "✓".green().bold(),
        CONFIG_FILE_NAME,
        format!("({} task{})", tasks.len(), plural(tasks.len())).dimmed()
    );

    println!("\n{}", "Hooks".bold());
    println!("{}", "─".repeat(40).dimmed());
    install_hooks_non_fatal(&root);

    print_summary(tasks.len());
    Ok(())
}

/// Hook installation failure only warns; the config already on disk is the
/// valuable part.
fn install_hooks_non_fatal(root: &Path) {
    let repo_root = match git::find_repo_root_from(root) {
        Ok(repo_root) => repo_root,
        Err(err) => {
            println!(
                "  {} Hook installation skipped: {}",
                "!".yellow().bold(),
                err.to_string().dimmed()
            );
            return;
        }
    };

    for kind in HookKind::ALL {
        match git::hooks::install_hook(&repo_root, kind) {
            Ok(true) => {
                println!("  {} {} installed", "✓".green().bold(), kind.file_name());
            }
            Ok(false) => {
                println!(
                    "  {} {} {} up to date",
                    "✓".green().bold(),
                    kind.file_name(),
                    "already".dimmed()
                );
            }
            Err(err) => {
                println!(
                    "  {} {} installation failed: {}",
                    "!".yellow().bold(),
                    kind.file_name(),
                    err.to_string().dimmed()
                );
            }
        }
    }
}

fn print_header() {
    println!();
    println!("{}", "╭──────────────────────────────────────╮".cyan());
    println!(
        "{}",
        "│     Initializing Universal CI...     │".cyan().bold()
    );
    println!("{}", "╰──────────────────────────────────────╯".cyan());
}

fn print_summary(task_count: usize) {
    println!();
    println!("{}", "═".repeat(40).dimmed());
    println!(
        "{} {} ready with {} task{}",
        "✓".green().bold(),
        CONFIG_FILE_NAME,
        task_count.to_string().bold(),
        plural(task_count)
    );
    println!();
    println!("{}", "Next steps:".bold());
    println!("  {}  Run the verification suite", "universal-ci".cyan());
    println!(
        "  {}  Check the shims in .git/hooks",
        "universal-ci hooks status".cyan()
    );
    println!();
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
