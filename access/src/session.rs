//! User session.
//!
//! There is no global slot for the current user: a `Session` is created by the caller and
//! handed out as `Arc<Session>` to whatever needs it (the REST client for the bearer token, the
//! locator for the user's public id).  Only `login()` and `logout()` change it.
//!

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What the portal returns on login.
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Bearer token
    pub token: String,
    /// Public id of the user, key for the saved preference
    #[serde(alias = "public_id")]
    pub public_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, alias = "cep")]
    pub postal_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, alias = "birth_date")]
    pub birth_date: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<UserSession>>,
}

impl Session {
    /// Anonymous session
    ///
    pub fn new() -> Self {
        Session::default()
    }

    /// Session already logged in as `user`
    ///
    pub fn with_user(user: UserSession) -> Self {
        Session {
            user: RwLock::new(Some(user)),
        }
    }

    /// Store the user after a successful login or profile update.
    ///
    #[tracing::instrument(skip_all, fields(user = %user.public_id))]
    pub fn login(&self, user: UserSession) {
        info!("login");
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Forget the current user.
    ///
    #[tracing::instrument(skip(self))]
    pub fn logout(&self) {
        let old = self.user.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(old) = old {
            debug!("logout {}", old.public_id);
        }
    }

    /// Copy of the current user
    ///
    pub fn user(&self) -> Option<UserSession> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Does the current user have `role`?
    ///
    pub fn has_role(&self, role: &str) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|u| u.roles.iter().any(|r| r == role))
    }

    /// Bearer token of the current user
    ///
    pub fn token(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|u| !u.token.is_empty())
            .map(|u| u.token.clone())
    }

    /// Public id of the current user
    ///
    pub fn public_id(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|u| !u.public_id.is_empty())
            .map(|u| u.public_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maria() -> UserSession {
        UserSession {
            token: "tok".to_string(),
            public_id: "c0ffee".to_string(),
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            roles: vec!["ROLE_USER".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_session_anonymous() {
        let s = Session::new();
        assert!(!s.is_authenticated());
        assert!(!s.has_role("ROLE_USER"));
        assert_eq!(None, s.token());
        assert_eq!(None, s.public_id());
    }

    #[test]
    fn test_session_login_logout() {
        let s = Session::new();
        s.login(maria());
        assert!(s.is_authenticated());
        assert!(s.has_role("ROLE_USER"));
        assert!(!s.has_role("ROLE_ADMIN"));
        assert_eq!(Some("tok".to_string()), s.token());
        assert_eq!(Some("c0ffee".to_string()), s.public_id());

        s.logout();
        assert!(!s.is_authenticated());
        assert_eq!(None, s.user());
    }

    #[test]
    fn test_session_from_portal_json() {
        let json = r#"{
            "token": "tok",
            "publicId": "c0ffee",
            "name": "Maria",
            "email": "maria@example.com",
            "cep": "11717-005",
            "phone": "13997654321",
            "birthDate": "1990-01-01",
            "roles": ["ROLE_USER", "ROLE_ADMIN"]
        }"#;
        let user: UserSession = serde_json::from_str(json).unwrap();
        assert_eq!("c0ffee", user.public_id);
        assert_eq!("11717-005", user.postal_code);
        assert_eq!("1990-01-01", user.birth_date);

        let s = Session::with_user(user);
        assert!(s.has_role("ROLE_ADMIN"));
    }
}
