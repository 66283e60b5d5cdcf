//! Verification driver.
//!
//! Runs the selected tasks strictly in file order, one at a time, and
//! reduces the whole run to a single exit code. Commands may share mutable
//! project state inside a working directory, so sequential execution is a
//! correctness requirement here, not a simplification.

use crate::config::Config;
use crate::report::Reporter;
use crate::runner::{self, Outcome};

/// Aggregated result of one verification run. Computed fresh per
/// invocation; nothing persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub passed: usize,
    pub skipped: usize,
    /// Names of failed tasks, in execution order.
    pub failures: Vec<String>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The entire OS-boundary contract: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// Tasks attempted, skipped included.
    pub fn executed(&self) -> usize {
        self.passed + self.skipped + self.failures.len()
    }
}

/// Run every task selected by `stage` and collect the result.
///
/// A failed task never stops the run; remaining tasks still execute and the
/// summary names every failure. A skipped task never fails the run.
pub fn run(config: &Config, stage: Option<&str>, reporter: &Reporter) -> RunReport {
    reporter.banner(stage);

    let selected: Vec<_> = config
        .tasks
        .iter()
        .filter(|task| task.matches_stage(stage))
        .collect();

    if selected.is_empty() {
        if let Some(stage) = stage {
            reporter.no_tasks_selected(stage);
        }
    }

    let mut report = RunReport::default();
    for task in selected {
        match runner::execute(task, &config.root, reporter) {
            Outcome::Passed => report.passed += 1,
            Outcome::Skipped => report.skipped += 1,
            Outcome::Failed { .. } => report.failures.push(task.name.clone()),
        }
    }

    reporter.summary(&report);
    report
}
