use strum::EnumString;
use thiserror::Error;

use conecta_access::{ApiError, GeocodeError};
use conecta_common::PostalCodeError;

/// Broad class of a locator failure, what a caller would pick a message from.
///
#[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ResolutionFailure,
    NoResult,
    PersistenceFailure,
}

/// Locator failures.  None of them is fatal, all are scoped to one submission.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LocatorError {
    #[error("invalid postal code: {0}")]
    InvalidInput(#[from] PostalCodeError),
    #[error("{0}")]
    Resolution(#[from] GeocodeError),
    #[error("no facility found")]
    NoResult,
    #[error("can not save preference: {0}")]
    Persistence(#[from] ApiError),
}

impl LocatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LocatorError::InvalidInput(_) => ErrorKind::InvalidInput,
            LocatorError::Resolution(_) => ErrorKind::ResolutionFailure,
            LocatorError::NoResult => ErrorKind::NoResult,
            LocatorError::Persistence(_) => ErrorKind::PersistenceFailure,
        }
    }
}
