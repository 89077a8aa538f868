//! Library part of the `conectactl` utility.
//!
//! Command-line parsing, configuration loading and the code behind each sub-command.  The
//! locator itself lives in `conecta-locator`, the HTTP collaborators in `conecta-access`.
//!

/// Re-export
///
pub use cli::*;
pub use cmds::*;
pub use config::*;

mod cli;
mod cmds;
mod config;
