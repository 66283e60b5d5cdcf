use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems that stop a run before any task executes.
///
/// Task failures are not errors. They are recorded in the run report and
/// only surface through the process exit code.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no {} found (searched: {})", crate::CONFIG_FILE_NAME, display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("invalid task list in {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
