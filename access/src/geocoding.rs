//! Google Geocoding API client.
//!
//! `GET {base_url}/maps/api/geocode/json?address=<cep>, <region>&key=<api_key>`
//!
//! The provider answers `200 OK` in most cases, the real outcome is in the `status` field of
//! the JSON body.  On `OK`, the first result's `geometry.location` is what we want.
//!

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use conecta_common::{GeoLocation, PostalCode};

use crate::{AccessError, GeocodeError, Geocoder, Site};

/// Default provider URL
pub const GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";
/// Default route for JSON output
const GEOCODE_ROUTE: &str = "/maps/api/geocode/json";
/// Appended to the CEP so the provider does not pick a homonym abroad
pub const DEFAULT_REGION: &str = "Brasil";

/// Value of the `status` field
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    RequestDenied,
    InvalidRequest,
    OverQueryLimit,
    #[serde(other)]
    UnknownError,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeoLocation,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

/// Only the parts of the answer we use
///
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: GeocodeStatus,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

impl GeocodeResponse {
    /// Map the provider's answer to a location or one of our failures.
    ///
    fn into_location(self, cep: &PostalCode) -> Result<GeoLocation, GeocodeError> {
        let reason = |status: GeocodeStatus, msg: Option<String>| match msg {
            Some(msg) => format!("{status}: {msg}"),
            None => status.to_string(),
        };

        match self.status {
            GeocodeStatus::Ok => self
                .results
                .first()
                .map(|r| r.geometry.location)
                .ok_or_else(|| GeocodeError::NotFound(cep.to_string())),
            GeocodeStatus::ZeroResults => Err(GeocodeError::NotFound(cep.to_string())),
            GeocodeStatus::OverQueryLimit => Err(GeocodeError::QuotaExceeded),
            status => Err(GeocodeError::InvalidRequest(reason(status, self.error_message))),
        }
    }
}

/// Geocoder backed by the Google Geocoding API
///
#[derive(Clone, Debug)]
pub struct GoogleGeocoder {
    /// Full URL of the geocode route
    url: String,
    /// API key, never logged
    api_key: String,
    /// Region appended to the address
    region: String,
    /// reqwest async client
    client: Client,
}

impl GoogleGeocoder {
    /// Build from the site description, which must carry an API key.
    ///
    #[tracing::instrument(skip_all)]
    pub fn new(site: &Site) -> Result<Self, AccessError> {
        let api_key = site
            .auth()
            .api_key()
            .map(str::to_string)
            .ok_or_else(|| AccessError::NoApiKey(site.base_url.clone()))?;

        let client = Client::builder()
            .timeout(site.timeout())
            .gzip(true)
            .build()
            .map_err(|e| AccessError::Client(e.to_string()))?;

        let url = site.url(site.route("geocode", GEOCODE_ROUTE));
        trace!("geocoder url = {url}");

        Ok(GoogleGeocoder {
            url,
            api_key,
            region: DEFAULT_REGION.to_string(),
            client,
        })
    }

    /// Use another region suffix (empty for none).
    ///
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    /// Free-text address sent to the provider
    ///
    fn address(&self, cep: &PostalCode) -> String {
        if self.region.is_empty() {
            cep.to_string()
        } else {
            format!("{}, {}", cep, self.region)
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    fn name(&self) -> String {
        "google".to_string()
    }

    #[tracing::instrument(skip_all, fields(cep = %cep))]
    async fn resolve(&self, cep: &PostalCode) -> Result<GeoLocation, GeocodeError> {
        let address = self.address(cep);
        debug!("resolving {address}");

        let resp = http_get!(self.client, &self.url)
            .query(&[("address", address.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let code = resp.status();
        let body = resp.text().await?;

        let data: GeocodeResponse = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) if code.is_success() => {
                warn!("undecodable geocoder answer: {e}");
                return Err(GeocodeError::Network(format!("invalid answer: {e}")));
            }
            Err(_) => return Err(GeocodeError::Network(format!("HTTP {code}"))),
        };
        debug!("status = {}", data.status);

        let loc = data.into_location(cep)?;
        trace!("{cep} -> {loc}");
        Ok(loc)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::Auth;

    fn setup(server: &MockServer) -> GoogleGeocoder {
        let site = Site::new(&server.base_url()).with_auth(Auth::Key {
            api_key: "KEY".to_string(),
        });
        GoogleGeocoder::new(&site).unwrap()
    }

    fn cep() -> PostalCode {
        PostalCode::parse("11717-005").unwrap()
    }

    #[test]
    fn test_geocoder_needs_key() {
        let site = Site::new(GOOGLE_BASE_URL);
        let g = GoogleGeocoder::new(&site);
        assert!(matches!(g, Err(AccessError::NoApiKey(_))));
    }

    #[test]
    fn test_geocoder_address() {
        let site = Site::new(GOOGLE_BASE_URL).with_auth(Auth::Key {
            api_key: "KEY".to_string(),
        });
        let g = GoogleGeocoder::new(&site).unwrap();
        assert_eq!("11717005, Brasil", g.address(&cep()));
        let g = g.with_region("");
        assert_eq!("11717005", g.address(&cep()));
    }

    #[tokio::test]
    async fn test_geocoder_ok() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/maps/api/geocode/json")
                    .query_param("address", "11717005, Brasil")
                    .query_param("key", "KEY");
                then.status(200).json_body(json!({
                    "status": "OK",
                    "results": [
                        { "geometry": { "location": { "lat": -24.0195538, "lng": -46.5147097 } } },
                        { "geometry": { "location": { "lat": 1.0, "lng": 1.0 } } }
                    ]
                }));
            })
            .await;

        let g = setup(&server);
        let loc = g.resolve(&cep()).await;
        m.assert_async().await;
        assert_eq!(Ok(GeoLocation::new(-24.0195538, -46.5147097)), loc);
    }

    #[rstest]
    #[case(json!({"status": "ZERO_RESULTS", "results": []}), GeocodeError::NotFound("11717005".to_string()))]
    #[case(json!({"status": "OK", "results": []}), GeocodeError::NotFound("11717005".to_string()))]
    #[case(json!({"status": "OVER_QUERY_LIMIT", "results": []}), GeocodeError::QuotaExceeded)]
    #[case(json!({"status": "INVALID_REQUEST"}), GeocodeError::InvalidRequest("INVALID_REQUEST".to_string()))]
    #[case(
        json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}),
        GeocodeError::InvalidRequest("REQUEST_DENIED: The provided API key is invalid.".to_string())
    )]
    #[case(json!({"status": "UNKNOWN_ERROR"}), GeocodeError::InvalidRequest("UNKNOWN_ERROR".to_string()))]
    #[tokio::test]
    async fn test_geocoder_status_mapping(#[case] body: serde_json::Value, #[case] expected: GeocodeError) {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/geocode/json");
                then.status(200).json_body(body);
            })
            .await;

        let g = setup(&server);
        assert_eq!(Err(expected), g.resolve(&cep()).await);
    }

    #[tokio::test]
    async fn test_geocoder_http_error_without_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/geocode/json");
                then.status(502).body("Bad Gateway");
            })
            .await;

        let g = setup(&server);
        assert_eq!(
            Err(GeocodeError::Network("HTTP 502 Bad Gateway".to_string())),
            g.resolve(&cep()).await
        );
    }

    #[tokio::test]
    async fn test_geocoder_garbage() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/geocode/json");
                then.status(200).body("<html>nope</html>");
            })
            .await;

        let g = setup(&server);
        assert!(matches!(g.resolve(&cep()).await, Err(GeocodeError::Network(_))));
    }

    #[tokio::test]
    async fn test_geocoder_unreachable() {
        // Nothing listens on port 9 (discard) on a test box.
        let site = Site::new("http://127.0.0.1:9")
            .with_auth(Auth::Key {
                api_key: "KEY".to_string(),
            })
            .with_timeout(2);
        let g = GoogleGeocoder::new(&site).unwrap();
        assert!(matches!(g.resolve(&cep()).await, Err(GeocodeError::Network(_))));
    }
}
