//! This library is there to share some common code amongst all Conecta modules.
//!
//! - `GeoLocation` and the haversine distance
//! - `PostalCode`, the normalised Brazilian CEP
//! - form validators (CPF, phone, e-mail, password)
//! - `ConfigFile<T>`, the versioned HCL configuration loader
//! - logging initialisation
//!

use clap::{crate_name, crate_version};

pub use config::*;
pub use error::*;
pub use location::*;
pub use logging::*;
pub use postal::*;
pub use validate::*;

#[macro_use]
mod macros;

mod config;
mod error;
mod location;
mod logging;
mod postal;
mod validate;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Anything carrying a file format version.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// Configuration structs loadable through `ConfigFile<T>`, usually implemented through
/// `#[into_configfile]`.
///
pub trait IntoConfig: Versioned {
    /// Version this build of the code understands.
    const VERSION: usize;
    /// Default filename in the configuration directory.
    const FILENAME: &'static str;
}
