//! Client for the portal REST API.
//!
//! Every call carries the bearer token of the current session (or the static token from the
//! site description).  Error handling is centralised here:
//!
//! - `401`: the token is no good anymore, the session is logged out
//! - `403`: logged, returned as is
//! - non-2xx: the server's `{"message": …}` body if any, else `Error <code>: <reason>`
//! - `204`: no body, decoded as `null`
//!

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::{AccessError, ApiError, Session, Site};

/// Structured error body sent by the backend
///
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    /// Site description (base URL, static token, timeout)
    site: Site,
    /// Current user
    session: Arc<Session>,
    /// reqwest async client
    client: Client,
}

impl ApiClient {
    #[tracing::instrument(skip_all, fields(url = %site.base_url))]
    pub fn new(site: &Site, session: Arc<Session>) -> Result<Self, AccessError> {
        if site.base_url.is_empty() {
            return Err(AccessError::BadParam("empty API base_url".to_string()));
        }
        let client = Client::builder()
            .timeout(site.timeout())
            .gzip(true)
            .build()
            .map_err(|e| AccessError::Client(e.to_string()))?;
        Ok(ApiClient {
            site: site.clone(),
            session,
            client,
        })
    }

    /// Session shared with the caller
    ///
    pub fn session(&self) -> Arc<Session> {
        self.session.clone()
    }

    /// Session token first, then the site's own token
    ///
    fn token(&self) -> Option<String> {
        self.session
            .token()
            .or_else(|| self.site.auth().token().map(str::to_string))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.site.url(endpoint);
        let req = http_get!(self.client, &url, self.token());
        self.execute(req).await
    }

    #[tracing::instrument(skip(self, data))]
    pub async fn post<T, D>(&self, endpoint: &str, data: &D) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let url = self.site.url(endpoint);
        let req = http_send!(self.client, post, &url, self.token(), data);
        self.execute(req).await
    }

    #[tracing::instrument(skip(self, data))]
    pub async fn put<T, D>(&self, endpoint: &str, data: &D) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let url = self.site.url(endpoint);
        let req = http_send!(self.client, put, &url, self.token(), data);
        self.execute(req).await
    }

    /// Send the request and apply the common error handling.
    ///
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await.map_err(|e| {
            error!("network error or timeout: {e}");
            ApiError::from(e)
        })?;

        let code = resp.status();
        trace!("status = {code}");

        if code == StatusCode::NO_CONTENT {
            return serde_json::from_str("null").map_err(|e| ApiError::Decode(e.to_string()));
        }

        if code.is_success() {
            let body = resp.text().await?;
            return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Error {}: {}",
                    code.as_u16(),
                    code.canonical_reason().unwrap_or("Unknown")
                )
            });

        match code {
            StatusCode::UNAUTHORIZED => {
                warn!("token expired or invalid, logging out");
                self.session.logout();
            }
            StatusCode::FORBIDDEN => error!("access denied"),
            c if c.is_server_error() => error!("server error {c}"),
            _ => debug!("request failed: {message}"),
        }

        Err(ApiError::Status {
            code: code.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    use super::*;
    use crate::{Auth, UserSession};

    fn logged_in() -> Arc<Session> {
        Arc::new(Session::with_user(UserSession {
            token: "TOKEN".to_string(),
            public_id: "c0ffee".to_string(),
            ..Default::default()
        }))
    }

    #[test]
    fn test_api_client_needs_url() {
        let r = ApiClient::new(&Site::default(), Arc::new(Session::new()));
        assert!(matches!(r, Err(AccessError::BadParam(_))));
    }

    #[tokio::test]
    async fn test_api_get_with_bearer() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ping")
                    .header("authorization", "Bearer TOKEN");
                then.status(200).json_body(json!({"pong": true}));
            })
            .await;

        let api = ApiClient::new(&Site::new(&server.base_url()), logged_in()).unwrap();
        let v: Value = api.get("/ping").await.unwrap();
        m.assert_async().await;
        assert_eq!(json!({"pong": true}), v);
    }

    #[tokio::test]
    async fn test_api_static_token_when_anonymous() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ping")
                    .header("authorization", "Bearer STATIC");
                then.status(200).json_body(json!(1));
            })
            .await;

        let site = Site::new(&server.base_url()).with_auth(Auth::Token {
            token: "STATIC".to_string(),
        });
        let api = ApiClient::new(&site, Arc::new(Session::new())).unwrap();
        let v: u32 = api.get("/ping").await.unwrap();
        m.assert_async().await;
        assert_eq!(1, v);
    }

    #[tokio::test]
    async fn test_api_no_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/logout");
                then.status(204);
            })
            .await;

        let api = ApiClient::new(&Site::new(&server.base_url()), logged_in()).unwrap();
        let v: Option<Value> = api.post("/auth/logout", &json!({})).await.unwrap();
        assert_eq!(None, v);
    }

    #[tokio::test]
    async fn test_api_structured_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/usafas/3");
                then.status(400)
                    .json_body(json!({"message": "CEP inválido", "status": 400}));
            })
            .await;

        let api = ApiClient::new(&Site::new(&server.base_url()), logged_in()).unwrap();
        let r: Result<Value, _> = api.put("/usafas/3", &json!({})).await;
        assert_eq!(
            Err(ApiError::Status {
                code: 400,
                message: "CEP inválido".to_string()
            }),
            r
        );
    }

    #[tokio::test]
    async fn test_api_generic_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boom");
                then.status(500);
            })
            .await;

        let api = ApiClient::new(&Site::new(&server.base_url()), logged_in()).unwrap();
        let r: Result<Value, _> = api.get("/boom").await;
        let err = r.unwrap_err();
        assert_eq!(Some(500), err.status());
        assert_eq!("Error 500: Internal Server Error", err.to_string());
    }

    #[tokio::test]
    async fn test_api_unauthorized_logs_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/me");
                then.status(401);
            })
            .await;

        let session = logged_in();
        let api = ApiClient::new(&Site::new(&server.base_url()), session.clone()).unwrap();
        let r: Result<Value, _> = api.get("/me").await;
        assert_eq!(Some(401), r.unwrap_err().status());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_api_bad_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ping");
                then.status(200).body("not json");
            })
            .await;

        let api = ApiClient::new(&Site::new(&server.base_url()), logged_in()).unwrap();
        let r: Result<Value, _> = api.get("/ping").await;
        assert!(matches!(r, Err(ApiError::Decode(_))));
    }
}
