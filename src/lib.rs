pub mod commands;
pub mod completions;
pub mod config;
pub mod detect;
pub mod driver;
pub mod error;
pub mod git;
pub mod report;
pub mod resolver;
pub mod runner;

/// Fixed name of the task-list file the resolver searches for.
pub const CONFIG_FILE_NAME: &str = "universal-ci.config.json";
