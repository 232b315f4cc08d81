//! Chat with the assistant about the current draft.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use cowriter_core::chat::{CHAT_ERROR_REPLY, Message, WELCOME_MESSAGE};
use cowriter_interaction::BackendClient;
use cowriter_interaction::dto::ChatRequest;

use crate::connection::ConnectionManager;
use crate::dispatch::ProcessingGuard;

/// Result of [`ChatSession::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, no connection, or a request already in flight.
    Ignored,
    Replied(Message),
    /// The request failed and the canned error reply was appended.
    Failed(Message),
}

/// Append-only chat log with a single outstanding request at most.
pub struct ChatSession {
    client: Arc<dyn BackendClient>,
    connection: Arc<ConnectionManager>,
    messages: Mutex<Vec<Message>>,
    sending: AtomicBool,
}

impl ChatSession {
    pub fn new(client: Arc<dyn BackendClient>, connection: Arc<ConnectionManager>) -> Self {
        Self {
            client,
            connection,
            messages: Mutex::new(vec![Message::assistant(WELCOME_MESSAGE)]),
            sending: AtomicBool::new(false),
        }
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::SeqCst)
    }

    /// Sends `message` with the editor `buffer` as context.
    pub async fn send(&self, message: &str, buffer: &str) -> SendOutcome {
        if message.trim().is_empty() || !self.connection.is_connected().await {
            return SendOutcome::Ignored;
        }
        let Some(_guard) = ProcessingGuard::try_acquire(&self.sending) else {
            tracing::debug!("[ChatSession] Ignoring message while a reply is pending");
            return SendOutcome::Ignored;
        };

        self.messages.lock().await.push(Message::user(message));

        let request = ChatRequest {
            message: message.to_string(),
            context: (!buffer.is_empty()).then(|| format!("Current editor content: {}", buffer)),
        };

        let outcome = match self.client.chat(&request).await {
            Ok(text) => SendOutcome::Replied(Message::assistant(text)),
            Err(e) => {
                tracing::error!("[ChatSession] Chat request failed: {}", e);
                SendOutcome::Failed(Message::assistant(CHAT_ERROR_REPLY))
            }
        };

        if let SendOutcome::Replied(reply) | SendOutcome::Failed(reply) = &outcome {
            self.messages.lock().await.push(reply.clone());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeBackend, connected_manager};
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_log_starts_with_welcome() {
        let backend = Arc::new(FakeBackend::default());
        let chat = ChatSession::new(backend.clone(), Arc::new(ConnectionManager::new(backend)));

        let messages = chat.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, WELCOME_MESSAGE);
        assert!(!messages[0].is_user);
    }

    #[tokio::test]
    async fn test_ignored_without_connection_or_text() {
        let backend = Arc::new(FakeBackend::connected());
        let chat = ChatSession::new(backend.clone(), Arc::new(ConnectionManager::new(backend.clone())));
        assert_eq!(chat.send("hello", "").await, SendOutcome::Ignored);

        let chat = ChatSession::new(backend.clone(), connected_manager(backend.clone()).await);
        assert_eq!(chat.send("   ", "").await, SendOutcome::Ignored);
        assert_eq!(backend.call_count(), 0);
        assert_eq!(chat.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reply_with_editor_context() {
        let backend = Arc::new(FakeBackend {
            chat_reply: "Try a stronger opening.".into(),
            ..FakeBackend::connected()
        });
        let chat = ChatSession::new(backend.clone(), connected_manager(backend.clone()).await);

        let outcome = chat.send("How can I improve this?", "My draft").await;
        assert!(matches!(outcome, SendOutcome::Replied(ref m) if m.text == "Try a stronger opening."));

        let request = backend.last_chat.lock().unwrap().clone().unwrap();
        assert_eq!(request.context.as_deref(), Some("Current editor content: My draft"));

        let messages = chat.messages().await;
        assert_eq!(messages.len(), 3);
        assert!(messages[1].is_user);
        assert_eq!(messages[1].text, "How can I improve this?");
    }

    #[tokio::test]
    async fn test_empty_buffer_sends_no_context() {
        let backend = Arc::new(FakeBackend::connected());
        let chat = ChatSession::new(backend.clone(), connected_manager(backend.clone()).await);

        chat.send("hi", "").await;
        assert!(backend.last_chat.lock().unwrap().as_ref().unwrap().context.is_none());
    }

    #[tokio::test]
    async fn test_failure_appends_canned_reply() {
        let backend = Arc::new(FakeBackend {
            failure: Some((500, Some("boom".into()))),
            ..FakeBackend::connected()
        });
        let chat = ChatSession::new(backend.clone(), connected_manager(backend.clone()).await);

        let outcome = chat.send("hi", "").await;
        assert!(matches!(outcome, SendOutcome::Failed(ref m) if m.text == CHAT_ERROR_REPLY));
        assert!(!chat.is_sending());
        assert_eq!(chat.messages().await.last().unwrap().text, CHAT_ERROR_REPLY);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_rapid_double_send_makes_one_request() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(FakeBackend {
            gate: Some(gate.clone()),
            chat_reply: "pong".into(),
            ..FakeBackend::connected()
        });
        let chat = Arc::new(ChatSession::new(
            backend.clone(),
            connected_manager(backend.clone()).await,
        ));

        let first = {
            let chat = chat.clone();
            tokio::spawn(async move { chat.send("ping", "").await })
        };
        while backend.call_count() == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(chat.send("ping again", "").await, SendOutcome::Ignored);
        gate.notify_one();
        assert!(matches!(first.await.unwrap(), SendOutcome::Replied(_)));
        assert_eq!(backend.call_count(), 1);
        assert!(!chat.is_sending());

        // The guard is released, so the next message goes through.
        gate.notify_one();
        assert!(matches!(chat.send("third", "").await, SendOutcome::Replied(_)));
    }
}
