//! The verification run: resolve, load, execute, exit.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use tracing::debug;

use crate::config::Config;
use crate::driver;
use crate::report::{Reporter, RunEnvironment};
use crate::resolver;

/// Execute a verification run.
///
/// The exit code is the whole contract with the git hooks: configuration
/// problems and task failures both leave through `process::exit(1)`, and
/// returning `Ok(())` means every selected task passed or was skipped.
pub fn execute(config_path: Option<PathBuf>, stage: Option<String>) -> Result<()> {
    let reporter = Reporter::new(RunEnvironment::detect());

    let resolution = resolver::resolve(config_path.as_deref());
    let config = match Config::load_resolved(&resolution) {
        Ok(config) => config,
        Err(err) => {
            reporter.config_error(&err);
            process::exit(1);
        }
    };

    debug!(
        "loaded {} task(s) from {}",
        config.tasks.len(),
        resolution.path.display()
    );

    let report = driver::run(&config, stage.as_deref(), &reporter);
    if !report.success() {
        process::exit(report.exit_code());
    }
    Ok(())
}
