//! Saved locator preference, stored by the portal backend.
//!
//! - `GET  /usafas/user/{publicId}` → saved record, `404` when there is none
//! - `POST /usafas` → create, body `{userPublicId, facilityName, postalCode}`
//! - `PUT  /usafas/{id}` → update, body `{facilityName, postalCode}`
//!

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{ApiClient, ApiError, PreferenceStore};

/// Default routes, relative to the API base URL
const ROUTE_BY_USER: &str = "/usafas/user";
const ROUTE_BASE: &str = "/usafas";

/// Record as stored by the backend.
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPreference {
    /// Database id
    pub id: u64,
    pub user_public_id: String,
    pub facility_name: String,
    pub postal_code: String,
}

/// What we send on create and update.
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencePayload {
    pub facility_name: String,
    pub postal_code: String,
}

/// Create body, the payload plus the owner.
///
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody<'a> {
    user_public_id: &'a str,
    #[serde(flatten)]
    data: &'a PreferencePayload,
}

/// `PreferenceStore` on top of the portal REST API
///
#[derive(Clone, Debug)]
pub struct RestPreferenceStore {
    api: ApiClient,
}

impl RestPreferenceStore {
    pub fn new(api: ApiClient) -> Self {
        RestPreferenceStore { api }
    }
}

#[async_trait]
impl PreferenceStore for RestPreferenceStore {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, user: &str) -> Result<Option<SavedPreference>, ApiError> {
        let url = format!("{ROUTE_BY_USER}/{user}");
        match self.api.get::<SavedPreference>(&url).await {
            Ok(pref) => {
                trace!("saved = {pref:?}");
                Ok(Some(pref))
            }
            Err(ApiError::Status { code: 404, .. }) => {
                debug!("nothing saved for {user}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, user: &str, data: &PreferencePayload) -> Result<SavedPreference, ApiError> {
        let body = CreateBody {
            user_public_id: user,
            data,
        };
        self.api.post(ROUTE_BASE, &body).await
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: u64, data: &PreferencePayload) -> Result<SavedPreference, ApiError> {
        let url = format!("{ROUTE_BASE}/{id}");
        self.api.put(&url, data).await
    }
}
