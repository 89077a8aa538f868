//!  Module that defines what is a site (API endpoint).
//!
//! We talk to two of them: the geocoding provider and the portal REST API.  Both are described
//! in the configuration file with a base URL, optional credentials, an optional timeout and
//! optional route overrides.
//!

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Auth;

/// Default request timeout, in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Describe what a site is and associated credentials.
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Site {
    /// Base URL (to avoid repeating)
    pub base_url: String,
    /// Credentials
    pub auth: Option<Auth>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
    /// Route overrides
    pub routes: Option<BTreeMap<String, String>>,
}

impl Site {
    pub fn new(base_url: &str) -> Self {
        Site {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }

    /// Credentials, `Anon` if none
    ///
    pub fn auth(&self) -> Auth {
        self.auth.clone().unwrap_or_default()
    }

    /// Request timeout
    ///
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
    }

    /// Retrieve a route, falling back to `default`
    ///
    pub fn route<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match &self.routes {
            Some(routes) => routes.get(key).map(String::as_str).unwrap_or(default),
            None => default,
        }
    }

    /// Full URL for an endpoint
    ///
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}
