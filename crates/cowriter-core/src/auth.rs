//! Bearer token access for authenticated backend requests.
//!
//! Obtaining a token (login/registration) happens outside this workspace;
//! only the persisted result is read here.

use serde::{Deserialize, Serialize};

/// Source of the bearer token attached to backend requests.
pub trait TokenProvider: Send + Sync {
    /// The current token, if the user is signed in.
    fn bearer_token(&self) -> Option<String>;
}

/// Profile of the signed-in user as stored next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Provider used when no token source is configured.
#[derive(Debug, Clone, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}
