//! Access methods for the external collaborators of the locator.
//!
//! The different submodules deal with the differences between them:
//!
//! - the geocoding provider, turning a CEP into coordinates (`Geocoder`)
//! - the portal REST API, where the user's last result is saved (`PreferenceStore`)
//! - the user session, which carries the bearer token and the user's public id
//!

use std::fmt::Debug;

use async_trait::async_trait;

use conecta_common::{GeoLocation, PostalCode};

// Re-export these modules for a shorter import path.
//
pub use api::*;
pub use auth::*;
pub use error::*;
pub use geocoding::*;
pub use preferences::*;
pub use session::*;
pub use site::*;

#[macro_use]
mod macros;

mod api;
mod auth;
mod error;
mod geocoding;
mod preferences;
mod session;
mod site;

/// Anything able to resolve a postal code into coordinates.
///
/// A single call is a single attempt, implementations must not retry.
///
#[async_trait]
pub trait Geocoder: Debug + Send + Sync {
    /// Provider name
    fn name(&self) -> String;
    /// Resolve a normalised CEP
    async fn resolve(&self, cep: &PostalCode) -> Result<GeoLocation, GeocodeError>;
}

/// Storage for the user's saved locator result, keyed by the user's public id.
///
#[async_trait]
pub trait PreferenceStore: Debug + Send + Sync {
    /// Saved record for this user, `None` if there is nothing yet
    async fn fetch(&self, user: &str) -> Result<Option<SavedPreference>, ApiError>;
    /// First save for this user
    async fn create(&self, user: &str, data: &PreferencePayload) -> Result<SavedPreference, ApiError>;
    /// Overwrite an existing record
    async fn update(&self, id: u64, data: &PreferencePayload) -> Result<SavedPreference, ApiError>;
}

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
