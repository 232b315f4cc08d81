//! Persisted bearer token access.
//!
//! The token is written by the sign-in flow as a plain string under
//! [`AUTH_TOKEN_KEY`], with the user's profile as JSON under
//! [`AUTH_USER_KEY`].

use std::sync::Arc;

use cowriter_core::auth::{AuthUser, TokenProvider};
use cowriter_core::storage::{AUTH_TOKEN_KEY, AUTH_USER_KEY};

use crate::persistence::StorageAdapter;

pub struct KvAuthTokenStore {
    adapter: Arc<StorageAdapter>,
}

impl KvAuthTokenStore {
    pub fn new(adapter: Arc<StorageAdapter>) -> Self {
        Self { adapter }
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.adapter.load(AUTH_USER_KEY)
    }

    /// Stores a token obtained elsewhere.
    pub fn set_token(&self, token: &str) {
        self.adapter.save_raw(AUTH_TOKEN_KEY, token);
    }

    /// Forgets the token and the user profile.
    pub fn clear(&self) {
        self.adapter.remove(AUTH_TOKEN_KEY);
        self.adapter.remove(AUTH_USER_KEY);
    }
}

impl TokenProvider for KvAuthTokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.adapter
            .load_raw(AUTH_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn test_token_lifecycle() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([(
            AUTH_USER_KEY,
            r#"{"id": 7, "email": "a@b.c"}"#,
        )]));
        let tokens = KvAuthTokenStore::new(Arc::new(StorageAdapter::new(store)));

        assert!(tokens.bearer_token().is_none());
        tokens.set_token("jwt-123");
        assert_eq!(tokens.bearer_token().as_deref(), Some("jwt-123"));
        assert_eq!(tokens.user().map(|u| u.email), Some("a@b.c".to_string()));

        tokens.clear();
        assert!(tokens.bearer_token().is_none());
        assert!(tokens.user().is_none());
    }
}
