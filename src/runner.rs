//! Task execution.
//!
//! One task at a time, through a shell, with this process's stdout/stderr
//! attached so the operator watches tool output live instead of a buffered
//! dump at the end.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::Task;
use crate::report::Reporter;

/// Classified result of one task execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// Non-zero exit status, `code: None` when the process died to a signal
    /// or could not be launched at all.
    Failed { code: Option<i32> },
    /// The declared working directory does not exist. Deliberately not a
    /// failure: a task scoped to an absent optional subproject must not
    /// block verification.
    Skipped,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Run one task and classify the result.
///
/// The command string is handed to the shell verbatim (`sh -c` on unix,
/// `cmd /C` on windows) so `&&` chains, pipes and redirection keep their
/// meaning. Launch errors are downgraded to `Failed` so one broken task
/// cannot stop the rest of the run.
pub fn execute(task: &Task, root: &Path, reporter: &Reporter) -> Outcome {
    let dir = task.resolved_dir(root);
    reporter.task_header(task, &dir);

    if !dir.exists() {
        debug!("skipping {:?}: {} does not exist", task.name, dir.display());
        let outcome = Outcome::Skipped;
        reporter.verdict(task, &outcome);
        return outcome;
    }

    let status = if cfg!(target_family = "unix") {
        Command::new("sh")
            .arg("-c")
            .arg(&task.command)
            .current_dir(&dir)
            .status()
    } else {
        Command::new("cmd")
            .arg("/C")
            .arg(&task.command)
            .current_dir(&dir)
            .status()
    };

    let outcome = match status {
        Ok(status) if status.success() => Outcome::Passed,
        Ok(status) => Outcome::Failed {
            code: status.code(),
        },
        Err(err) => {
            reporter.execution_error(&err);
            Outcome::Failed { code: None }
        }
    };

    reporter.verdict(task, &outcome);
    outcome
}
