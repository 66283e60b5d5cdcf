//! Operator-facing console output.
//!
//! Everything the run prints goes through [`Reporter`], so the execution
//! engine carries no terminal coupling and tests can drive it without
//! global state.

use std::env;
use std::io;
use std::path::Path;

use colored::Colorize;

use crate::config::Task;
use crate::driver::RunReport;
use crate::error::ConfigError;
use crate::runner::Outcome;
use crate::CONFIG_FILE_NAME;

/// Where the run is happening. Selects log phrasing only; no behavior
/// branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnvironment {
    GitHubActions,
    LocalShell,
}

impl RunEnvironment {
    /// Detected from the `GITHUB_ACTIONS` variable; empty counts as unset.
    pub fn detect() -> Self {
        match env::var("GITHUB_ACTIONS") {
            Ok(value) if !value.is_empty() => RunEnvironment::GitHubActions,
            _ => RunEnvironment::LocalShell,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RunEnvironment::GitHubActions => "GitHub Actions / Act",
            RunEnvironment::LocalShell => "Local Shell",
        }
    }
}

/// Console reporter for a verification run.
pub struct Reporter {
    environment: RunEnvironment,
}

impl Reporter {
    pub fn new(environment: RunEnvironment) -> Self {
        Self { environment }
    }

    pub fn banner(&self, stage: Option<&str>) {
        println!(
            "{} Universal CI verification",
            "→".cyan().bold()
        );
        println!("  {} {}", "environment:".dimmed(), self.environment.label());
        if let Some(stage) = stage {
            println!("  {} {}", "stage:".dimmed(), stage);
        }
    }

    pub fn task_header(&self, task: &Task, dir: &Path) {
        println!();
        println!("{}", "─".repeat(40).dimmed());
        println!("{} {}", "→".cyan().bold(), task.name.bold());
        println!("  {} {}", "dir:".dimmed(), dir.display());
        println!("  {} {}", "cmd:".dimmed(), task.command);
    }

    pub fn verdict(&self, task: &Task, outcome: &Outcome) {
        match outcome {
            Outcome::Passed => {
                println!("  {} {} passed", "✓".green().bold(), task.name);
            }
            Outcome::Failed { code: Some(code) } => {
                println!("  {} {} failed (exit {})", "✗".red().bold(), task.name, code);
            }
            Outcome::Failed { code: None } => {
                println!("  {} {} failed", "✗".red().bold(), task.name);
            }
            Outcome::Skipped => {
                println!(
                    "  {} {} skipped (directory not found)",
                    "−".yellow(),
                    task.name
                );
            }
        }
    }

    pub fn execution_error(&self, err: &io::Error) {
        println!("  {} execution error: {}", "✗".red().bold(), err);
    }

    pub fn no_tasks_selected(&self, stage: &str) {
        println!();
        println!(
            "  {} no tasks tagged for stage {} (vacuous pass)",
            "−".dimmed(),
            stage
        );
    }

    pub fn summary(&self, report: &RunReport) {
        println!();
        println!("{}", "═".repeat(40).dimmed());
        println!("{}", "Summary".bold());
        if report.success() {
            println!(
                "  {} All tasks passed ({} passed, {} skipped)",
                "✓".green().bold(),
                report.passed,
                report.skipped
            );
        } else {
            println!(
                "  {} {} task(s) failed:",
                "✗".red().bold(),
                report.failures.len()
            );
            for name in &report.failures {
                println!("    {} {}", "→".yellow(), name);
            }
        }
    }

    pub fn config_error(&self, err: &ConfigError) {
        match err {
            ConfigError::NotFound { searched } => {
                eprintln!("{} no {} found", "✗".red().bold(), CONFIG_FILE_NAME);
                eprintln!("  searched:");
                for path in searched {
                    eprintln!("    {} {}", "−".dimmed(), path.display());
                }
                eprintln!(
                    "  create one with {} or pass {}",
                    "universal-ci init".cyan(),
                    "--config <path>".cyan()
                );
            }
            other => {
                eprintln!("{} {}", "✗".red().bold(), other);
            }
        }
    }
}
