//! Define our own macro to simplify the code
//!

/// Prepare a GET request with the proper headers
///
/// - `http_get!(client, url)` for open endpoints
/// - `http_get!(client, url, token)` adds the bearer token if there is one
///
#[macro_export]
macro_rules! http_get {
    ($client:expr, $url:expr) => {
        $client
            .get($url)
            .header(reqwest::header::USER_AGENT, $crate::version())
            .header(reqwest::header::ACCEPT, "application/json")
    };
    ($client:expr, $url:expr, $token:expr) => {
        match $token {
            Some(token) => $crate::http_get!($client, $url).bearer_auth(token),
            None => $crate::http_get!($client, $url),
        }
    };
}

/// Prepare a request with a JSON body and the proper headers
///
/// `http_send!(client, post, url, token, data)`
///
#[macro_export]
macro_rules! http_send {
    ($client:expr, $meth:ident, $url:expr, $token:expr, $data:expr) => {{
        let req = $client
            .$meth($url)
            .header(reqwest::header::USER_AGENT, $crate::version())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json($data);
        match $token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }};
}
