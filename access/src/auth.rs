use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Describe the possible ways to authenticate oneself
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auth {
    /// Nothing special, no auth
    #[default]
    Anon,
    /// Using an API key supplied through the URL
    Key { api_key: String },
    /// Using a fixed bearer token
    Token { token: String },
}

impl Auth {
    /// API key if there is one
    ///
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Auth::Key { api_key } if !api_key.is_empty() => Some(api_key),
            _ => None,
        }
    }

    /// Bearer token if there is one
    ///
    pub fn token(&self) -> Option<&str> {
        match self {
            Auth::Token { token } if !token.is_empty() => Some(token),
            _ => None,
        }
    }
}

impl Display for Auth {
    /// Obfuscate the keys & tokens
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let auth = match self {
            Auth::Key { .. } => Auth::Key {
                api_key: "HIDDEN".to_string(),
            },
            Auth::Token { .. } => Auth::Token {
                token: "HIDDEN".to_string(),
            },
            Auth::Anon => Auth::Anon,
        };
        write!(f, "{:?}", auth)
    }
}
