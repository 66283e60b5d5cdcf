//! Command implementations for the CLI.
//!
//! Each command is a `pub fn execute(..) -> Result<()>` dispatched from
//! `main`.

pub mod hooks;
pub mod init;
pub mod verify;
