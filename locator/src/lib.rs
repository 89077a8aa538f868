//! Nearest-clinic locator.
//!
//! - `facility`: the static clinic table, built-in or loaded from a file
//! - `search`: linear nearest-facility scan
//! - `state`: the locator state machine with its stale-completion guard
//! - `locator`: `Locator`, tying the geocoder, the table and the preference store together
//!

pub use error::*;
pub use facility::*;
pub use locator::*;
pub use search::*;
pub use state::*;

mod error;
mod facility;
mod locator;
mod search;
mod state;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
