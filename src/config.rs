//! Task list loading and validation.
//!
//! The on-disk document is a single JSON object with a top-level `tasks`
//! array. Parsing is two-phase: a permissive raw shape first, then per-entry
//! validation so malformed input is reported with the offending entry's
//! index instead of a bare serde message.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::resolver::Resolution;

/// One named, directory-scoped shell command plus an optional stage tag.
///
/// Immutable once loaded; created from the config file at the start of a run
/// and discarded at process exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub name: String,
    /// Directory the command runs in, relative to the config file's
    /// directory. Defaults to `.` when omitted.
    pub working_directory: String,
    /// Opaque shell command line; may use `&&`, pipes and redirection. The
    /// config file is trusted input, so no escaping or parsing is applied.
    pub command: String,
    /// Stage tag, e.g. `test` or `release`. Unset matches every filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl Task {
    /// Directory the command should run in, anchored at the config root.
    /// Absolute `working_directory` values are used as-is.
    pub fn resolved_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.working_directory)
    }

    /// Stage selection: exact match, or always selected when untagged.
    pub fn matches_stage(&self, filter: Option<&str>) -> bool {
        match (filter, self.stage.as_deref()) {
            (Some(want), Some(have)) => want == have,
            _ => true,
        }
    }
}

/// A validated task list plus the directory its relative paths resolve
/// against.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tasks in file order. Order is execution order.
    pub tasks: Vec<Task>,
    /// The config file's parent directory.
    pub root: PathBuf,
}

impl Config {
    /// Load and validate the task list at `path`.
    ///
    /// A missing file is reported as [`ConfigError::NotFound`] naming `path`
    /// as the only searched location. Callers that ran the resolver search
    /// should use [`Config::load_resolved`] so the report names every probed
    /// location.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_inner(path, || vec![path.to_path_buf()])
    }

    /// Load the file a resolver search settled on.
    pub fn load_resolved(resolution: &Resolution) -> Result<Self, ConfigError> {
        Self::load_inner(&resolution.path, || resolution.searched.clone())
    }

    fn load_inner(
        path: &Path,
        searched: impl FnOnce() -> Vec<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    searched: searched(),
                });
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let malformed = |reason: String| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let raw: RawConfig =
            serde_json::from_str(text).map_err(|err| malformed(err.to_string()))?;
        let entries = raw
            .tasks
            .ok_or_else(|| malformed("missing top-level `tasks` array".to_string()))?;

        let mut tasks = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            tasks.push(entry.into_task(index).map_err(malformed)?);
        }

        let root = match path.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        debug!("parsed {} task(s), root {}", tasks.len(), root.display());
        Ok(Config { tasks, root })
    }
}

/// Render a task list as the on-disk document, pretty-printed with a
/// trailing newline.
pub fn render_document(tasks: &[Task]) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct Document<'a> {
        tasks: &'a [Task],
    }

    let mut text = serde_json::to_string_pretty(&Document { tasks })?;
    text.push('\n');
    Ok(text)
}

/// Permissive on-disk shape. Every field is optional here so validation can
/// point at the exact entry and field instead of failing mid-deserialize.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    tasks: Option<Vec<RawTask>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawTask {
    name: Option<String>,
    working_directory: Option<String>,
    command: Option<String>,
    stage: Option<String>,
}

impl RawTask {
    fn into_task(self, index: usize) -> Result<Task, String> {
        let name = required_field(self.name, index, "name")?;
        let command = required_field(self.command, index, "command")?;
        let working_directory = match self.working_directory {
            Some(dir) if dir.trim().is_empty() => {
                return Err(format!(
                    "tasks[{index}]: field `working_directory` must not be empty"
                ));
            }
            Some(dir) => dir,
            None => ".".to_string(),
        };
        Ok(Task {
            name,
            working_directory,
            command,
            stage: self.stage,
        })
    }
}

fn required_field(value: Option<String>, index: usize, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(format!("tasks[{index}]: field `{field}` must not be empty")),
        None => Err(format!("tasks[{index}]: missing required field `{field}`")),
    }
}
