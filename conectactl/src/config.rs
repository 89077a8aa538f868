//! Configuration for `conectactl`.
//!
//! ```hcl
//! version = 1
//!
//! geocoding {
//!   api_key = "AIza..."
//!   region  = "Brasil"
//! }
//!
//! api {
//!   base_url = "http://localhost:8080/api/v1"
//!   timeout  = 10
//! }
//!
//! session {
//!   token     = "eyJ..."
//!   publicId  = "8c1f..."
//!   name      = "Maria"
//!   email     = "maria@example.com"
//! }
//! ```
//!
//! Everything is optional, a missing default file means an empty configuration.  The
//! `CONECTA_GEOCODING_KEY` and `CONECTA_API_URL` environment variables win over the file.
//!

use std::env;
use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Deserialize;
use tracing::{debug, trace};

use conecta_access::{Auth, Site, UserSession, DEFAULT_REGION, GOOGLE_BASE_URL};
use conecta_common::{ConfigFile, IntoConfig, Status, Versioned};
use conecta_macros::into_configfile;

/// Override for `geocoding.api_key`
pub const GEOCODING_KEY_VAR: &str = "CONECTA_GEOCODING_KEY";
/// Override for `api.base_url`
pub const API_URL_VAR: &str = "CONECTA_API_URL";

/// Geocoding provider parameters
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeocodingConfig {
    /// Provider URL, Google by default
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Appended to the CEP, empty for none
    pub region: Option<String>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl GeocodingConfig {
    /// Site description for the geocoder
    ///
    pub fn site(&self) -> Site {
        let mut site = Site::new(self.base_url.as_deref().unwrap_or(GOOGLE_BASE_URL));
        if let Some(api_key) = &self.api_key {
            site = site.with_auth(Auth::Key {
                api_key: api_key.clone(),
            });
        }
        if let Some(timeout) = self.timeout {
            site = site.with_timeout(timeout);
        }
        site
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

/// Configuration for the CLI tool
///
#[into_configfile(version = 1, filename = "conecta.hcl")]
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Portal REST API, needed to save results
    pub api: Option<Site>,
    /// Logged-in user
    pub session: Option<UserSession>,
    /// Alternate facilities table
    pub facilities: Option<PathBuf>,
}

impl Config {
    /// Apply environment overrides.
    ///
    pub fn merge_env(&mut self, api_key: Option<String>, api_url: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            trace!("geocoding key from environment");
            self.geocoding.api_key = Some(key);
        }
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            debug!("API URL from environment: {url}");
            match &mut self.api {
                Some(api) => api.base_url = url.trim_end_matches('/').to_string(),
                None => self.api = Some(Site::new(&url)),
            }
        }
    }
}

/// Load the configuration file and apply environment overrides.
///
/// The default file may be missing, a file given with `-c` may not.
///
#[tracing::instrument]
pub fn load_config(fname: Option<&Path>) -> Result<Config> {
    let mut cfg = match ConfigFile::<Config>::load(fname) {
        Ok(cfile) => {
            debug!("using {:?}", cfile.path());
            cfile.into_inner()
        }
        Err(e) if fname.is_none() && matches!(e.downcast_ref::<Status>(), Some(Status::MissingConfig(_))) => {
            debug!("no configuration file, using defaults");
            Config::default()
        }
        Err(e) => return Err(e),
    };
    cfg.merge_env(env::var(GEOCODING_KEY_VAR).ok(), env::var(API_URL_VAR).ok());
    Ok(cfg)
}
