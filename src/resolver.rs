//! Config path resolution.
//!
//! Pure lookup, no side effects. The search settles on a path even when no
//! candidate file exists (the bare filename, so the loader can report it
//! missing together with everything that was probed).

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::git;
use crate::CONFIG_FILE_NAME;

/// How many ancestor directories above the start are probed.
const ANCESTOR_SEARCH_DEPTH: usize = 3;

/// Outcome of a config-path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The path the loader should open.
    pub path: PathBuf,
    /// Every location that was probed, in search order.
    pub searched: Vec<PathBuf>,
}

/// Locate the task list for a run started in the current directory, using
/// git for repository-toplevel discovery.
pub fn resolve(explicit: Option<&Path>) -> Resolution {
    let start = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&start, explicit, &|| git::repo_toplevel_from(&start))
}

/// Search order, first existing file wins:
///
/// 1. the explicit path, used verbatim (existence is the loader's problem)
/// 2. `universal-ci.config.json` in `start`
/// 3. the same filename in up to three ancestor directories of `start`
/// 4. the same filename at the repository toplevel, when `repo_toplevel`
///    reports one
///
/// A failing toplevel query is "no match", never an error. When nothing
/// matched, the bare filename is returned for the loader to report missing.
pub fn resolve_from(
    start: &Path,
    explicit: Option<&Path>,
    repo_toplevel: &dyn Fn() -> Option<PathBuf>,
) -> Resolution {
    if let Some(path) = explicit {
        debug!("using explicit config path {}", path.display());
        return Resolution {
            path: path.to_path_buf(),
            searched: vec![path.to_path_buf()],
        };
    }

    let mut searched = Vec::new();

    let candidate = start.join(CONFIG_FILE_NAME);
    searched.push(candidate.clone());
    if candidate.is_file() {
        return Resolution {
            path: candidate,
            searched,
        };
    }

    for dir in start.ancestors().skip(1).take(ANCESTOR_SEARCH_DEPTH) {
        let candidate = dir.join(CONFIG_FILE_NAME);
        searched.push(candidate.clone());
        if candidate.is_file() {
            debug!("found config in ancestor {}", dir.display());
            return Resolution {
                path: candidate,
                searched,
            };
        }
    }

    if let Some(toplevel) = repo_toplevel() {
        let candidate = toplevel.join(CONFIG_FILE_NAME);
        // The toplevel often coincides with a directory already probed.
        if !searched.contains(&candidate) {
            searched.push(candidate.clone());
            if candidate.is_file() {
                debug!("found config at repository toplevel {}", toplevel.display());
                return Resolution {
                    path: candidate,
                    searched,
                };
            }
        }
    }

    debug!("no config found after {} probe(s)", searched.len());
    Resolution {
        path: PathBuf::from(CONFIG_FILE_NAME),
        searched,
    }
}
