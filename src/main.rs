use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use universal_ci::commands::{hooks, init, verify};
use universal_ci::completions::{generate_completions, Shell};

#[derive(Parser)]
#[command(name = "universal-ci")]
#[command(about = "Universal CI Verifier: config-driven verification gate for git hooks", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the task list (skips the config file search)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only run tasks tagged with this stage (untagged tasks always run)
    #[arg(long, value_name = "NAME")]
    stage: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the verification tasks (the default when no subcommand is given)
    Verify {
        /// Path to the task list (skips the config file search)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Only run tasks tagged with this stage (untagged tasks always run)
        #[arg(long, value_name = "NAME")]
        stage: Option<String>,
    },

    /// Detect project ecosystems, write a task list and install git hooks
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Manage the git hook shims
    Hooks {
        #[command(subcommand)]
        command: HooksCommands,
    },

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum HooksCommands {
    /// Install the pre-commit and pre-push shims into .git/hooks
    Install,

    /// Show which shims are installed
    Status,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Verify { config, stage }) => verify::execute(config, stage),
        Some(Commands::Init { force }) => init::execute(force),
        Some(Commands::Hooks { command }) => match command {
            HooksCommands::Install => hooks::install(),
            HooksCommands::Status => hooks::status(),
        },
        Some(Commands::Completions { shell }) => {
            let shell = Shell::from_str(&shell)?;
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell);
            Ok(())
        }
        None => verify::execute(cli.config, cli.stage),
    }
}

/// Diagnostics stay on stderr and are silent unless `RUST_LOG` is set, so
/// stdout carries nothing but the run output the hooks observe.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();
}
