//! Locator state machine.
//!
//! ```text
//! idle ──submit──▶ searching(seq) ──complete(seq)──▶ found | not_found | error
//!   ▲                                                        │
//!   └────────────── any state accepts a new submit ◀─────────┘
//! ```
//!
//! Completions carry the sequence number of the submission they belong to and are dropped
//! unless the machine is still searching for that very number.
//!

use serde::Serialize;
use tracing::{debug, trace};

use conecta_common::{GeoLocation, PostalCode};

use crate::{Facility, LocatorError};

/// Successful search
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocatorResult {
    /// Normalised postal code that was resolved
    pub postal_code: PostalCode,
    /// Where the geocoder put it
    pub location: GeoLocation,
    pub facility: Facility,
    /// Distance in km
    pub distance: f64,
}

#[derive(Clone, Debug, Default, PartialEq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LocatorState {
    #[default]
    Idle,
    Searching {
        seq: u64,
    },
    Found(LocatorResult),
    NotFound,
    Error(LocatorError),
}

impl LocatorState {
    /// Start a new search, whatever the current state.  The previous result is gone.
    ///
    pub fn submit(&mut self, seq: u64) {
        trace!("{} -> searching({seq})", self.as_ref());
        *self = LocatorState::Searching { seq };
    }

    /// Apply the outcome of submission `seq`.  Returns `false` when it is stale.
    ///
    pub fn complete(&mut self, seq: u64, outcome: Result<LocatorResult, LocatorError>) -> bool {
        match self {
            LocatorState::Searching { seq: current } if *current == seq => (),
            _ => {
                debug!("stale completion {seq} ignored, state is {}", self.as_ref());
                return false;
            }
        }

        *self = match outcome {
            Ok(res) => LocatorState::Found(res),
            Err(LocatorError::NoResult) => LocatorState::NotFound,
            Err(e) => LocatorState::Error(e),
        };
        trace!("searching({seq}) -> {}", self.as_ref());
        true
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        matches!(self, LocatorState::Searching { .. })
    }

    pub fn result(&self) -> Option<&LocatorResult> {
        match self {
            LocatorState::Found(res) => Some(res),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LocatorError> {
        match self {
            LocatorState::Error(e) => Some(e),
            _ => None,
        }
    }
}
