//! LLM connection state.
//!
//! The backend holds the actual model connection; this side only remembers
//! which connection last succeeded so requests can be gated on it.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use cowriter_core::llm::LlmConnection;
use cowriter_interaction::BackendClient;
use cowriter_interaction::dto::ConnectLlmRequest;

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to LLM";

/// A connect attempt failed; the message is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConnectError {
    pub message: String,
}

pub struct ConnectionManager {
    client: Arc<dyn BackendClient>,
    current: RwLock<Option<LlmConnection>>,
}

impl ConnectionManager {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self {
            client,
            current: RwLock::new(None),
        }
    }

    /// Asks the backend to connect to `connection`.
    ///
    /// On success the connection is remembered and the server message is
    /// returned. On any failure the session becomes disconnected.
    pub async fn connect(&self, connection: LlmConnection) -> Result<Option<String>, ConnectError> {
        let request = ConnectLlmRequest::from(&connection);
        tracing::info!("[ConnectionManager] Connecting to {}", connection.kind());

        let outcome = self.client.connect_llm(&request).await;
        let mut current = self.current.write().await;
        match outcome {
            Ok(response) if response.success => {
                tracing::info!("[ConnectionManager] Connected to {}", connection.kind());
                *current = Some(connection);
                Ok(response.message)
            }
            Ok(response) => {
                *current = None;
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| CONNECT_FAILED_MESSAGE.to_string());
                tracing::error!("[ConnectionManager] Connection refused: {}", message);
                Err(ConnectError { message })
            }
            Err(e) => {
                *current = None;
                tracing::error!("[ConnectionManager] Connection failed: {}", e);
                Err(ConnectError {
                    message: e.user_message(CONNECT_FAILED_MESSAGE),
                })
            }
        }
    }

    pub async fn disconnect(&self) {
        *self.current.write().await = None;
    }

    pub async fn current(&self) -> Option<LlmConnection> {
        self.current.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeBackend, openai};

    #[tokio::test]
    async fn test_successful_connect_stores_connection() {
        let backend = Arc::new(FakeBackend {
            connect_success: true,
            connect_message: Some("Successfully connected to OpenAI".into()),
            ..FakeBackend::default()
        });
        let manager = ConnectionManager::new(backend);

        let message = manager.connect(openai()).await.unwrap();
        assert_eq!(message.as_deref(), Some("Successfully connected to OpenAI"));
        assert_eq!(manager.current().await, Some(openai()));
    }

    #[tokio::test]
    async fn test_refused_connect_resets_to_disconnected() {
        let refusing = ConnectionManager {
            client: Arc::new(FakeBackend {
                connect_success: false,
                connect_message: Some("API key is required for OpenAI".into()),
                ..FakeBackend::default()
            }),
            current: RwLock::new(Some(openai())),
        };
        let err = refusing.connect(openai()).await.unwrap_err();
        assert_eq!(err.message, "API key is required for OpenAI");
        assert!(!refusing.is_connected().await);
    }

    #[tokio::test]
    async fn test_refusal_without_message_uses_fallback() {
        let manager = ConnectionManager::new(Arc::new(FakeBackend::default()));
        let err = manager.connect(openai()).await.unwrap_err();
        assert_eq!(err.to_string(), CONNECT_FAILED_MESSAGE);
        assert!(manager.current().await.is_none());
    }
}
