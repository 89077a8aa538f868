//! Error module
//!

use thiserror::Error;

/// Errors related to configuration files.
///
#[derive(Debug, Error)]
pub enum Status {
    #[error("Bad file version {0}, expected {1}")]
    BadFileVersion(usize, usize),
    #[error("Missing configuration file {0}")]
    MissingConfig(String),
    #[error("Error reading configuration({0})")]
    MissingConfigParameter(String),
    #[error("No usable home directory found")]
    NoHomeDir,
}
