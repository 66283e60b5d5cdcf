//! Shell completion generation.

use anyhow::{anyhow, Result};
use clap::Command;
use clap_complete::{generate, shells};
use std::io;
use std::str::FromStr;

/// Shells we can generate completion scripts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl FromStr for Shell {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            _ => Err(anyhow!(
                "Unsupported shell: {s}. Supported shells: bash, zsh, fish"
            )),
        }
    }
}

/// Write the completion script for `shell` to stdout.
///
/// # Example
///
/// ```no_run
/// use clap::Command;
/// use universal_ci::completions::{generate_completions, Shell};
/// use std::str::FromStr;
///
/// let mut cmd = Command::new("universal-ci");
/// let shell = Shell::from_str("bash").unwrap();
/// generate_completions(&mut cmd, shell);
/// ```
pub fn generate_completions(cmd: &mut Command, shell: Shell) {
    let bin_name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, cmd, bin_name, &mut io::stdout()),
        Shell::Zsh => generate(shells::Zsh, cmd, bin_name, &mut io::stdout()),
        Shell::Fish => generate(shells::Fish, cmd, bin_name, &mut io::stdout()),
    }
}
