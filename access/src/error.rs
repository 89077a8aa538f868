use thiserror::Error;

/// Custom error type for the access module, allow us to differentiate between errors.
///
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Bad configuration parameter: {0}")]
    BadParam(String),
    #[error("No API key configured for {0}")]
    NoApiKey(String),
    #[error("Can not build HTTP client: {0}")]
    Client(String),
}

/// Failures of the geocoding provider.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeocodeError {
    #[error("postal code {0} not found")]
    NotFound(String),
    #[error("geocoding request rejected: {0}")]
    InvalidRequest(String),
    #[error("geocoding quota exceeded")]
    QuotaExceeded,
    #[error("can not reach the geocoding service: {0}")]
    Network(String),
}

/// Failures of the portal REST API.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{message}")]
    Status { code: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if the server answered
    ///
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeocodeError::Network("timeout".to_string())
        } else {
            GeocodeError::Network(e.to_string())
        }
    }
}
