use std::sync::Arc;
use std::time::Duration;

use cowriter_application::{DispatchError, SendOutcome, WriterSession};
use cowriter_core::chat::CHAT_ERROR_REPLY;
use cowriter_core::document::Document;
use cowriter_core::llm::LlmConnection;
use cowriter_core::score::Score;
use cowriter_core::storage::{CONFIG_KEY, HISTORY_KEY, KeyValueStore};
use cowriter_infrastructure::storage::MemoryKeyValueStore;
use cowriter_infrastructure::{KvAuthTokenStore, StorageAdapter};
use cowriter_interaction::HttpBackendClient;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    store: Arc<MemoryKeyValueStore>,
    session: WriterSession,
}

async fn start(server: &MockServer, store: Arc<MemoryKeyValueStore>) -> Harness {
    let adapter = Arc::new(StorageAdapter::new(store.clone()));
    let tokens = Arc::new(KvAuthTokenStore::new(adapter.clone()));
    let client = HttpBackendClient::new(
        format!("{}/api/v1", server.uri()),
        Duration::from_secs(5),
        tokens,
    )
    .unwrap();
    let session = WriterSession::start(adapter, Arc::new(client), Duration::from_millis(50)).await;
    Harness { store, session }
}

async fn mount_connect(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/connect_llm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Successfully connected to OpenAI"
        })))
        .mount(server)
        .await;
}

fn openai() -> LlmConnection {
    LlmConnection::OpenAi {
        api_key: "sk-test".into(),
    }
}

fn history(store: &MemoryKeyValueStore) -> Vec<Document> {
    serde_json::from_str(&store.get_item(HISTORY_KEY).unwrap().unwrap()).unwrap()
}

#[tokio::test]
async fn action_without_connection_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submit_action"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let h = start(&server, Arc::new(MemoryKeyValueStore::new())).await;
    h.session.edit("Some draft").await;

    let err = h.session.run_action("Expand").await.unwrap_err();
    assert_eq!(err, DispatchError::NotConnected);
    assert_eq!(err.to_string(), "Please connect to an LLM first");
}

#[tokio::test]
async fn action_result_replaces_buffer_and_is_committed() {
    let server = MockServer::start().await;
    mount_connect(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submit_action"))
        .and(header("authorization", "Bearer stored-token"))
        .and(body_partial_json(serde_json::json!({
            "action": "expand",
            "text": "Rust is fast.",
            "document_type": "LinkedIn",
            "action_description": "Expand the text while maintaining the context formatted for a professional LinkedIn post"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "text": "Rust is fast, safe and productive."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryKeyValueStore::with_entries([
        ("token", "stored-token"),
        ("selectedDocumentTypes", "[\"LinkedIn\"]"),
    ]));
    let h = start(&server, store).await;
    h.session.connect(openai()).await.unwrap();
    h.session.edit("Rust is fast.").await;

    let text = h.session.run_action("1").await.unwrap();
    assert_eq!(text, "Rust is fast, safe and productive.");
    assert_eq!(h.session.documents().buffer().await, text);

    h.session.close().await;
    assert_eq!(history(&h.store)[0].content, text);
}

#[tokio::test]
async fn eval_outcome_is_recorded_and_cleared_by_edits() {
    let server = MockServer::start().await;
    mount_connect(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submit_eval"))
        .and(body_partial_json(serde_json::json!({"eval_name": "clarity"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "score": 9,
            "result": "Rating: 9/10. Very clear."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryKeyValueStore::new());
    let h = start(&server, store.clone()).await;
    h.session.connect(openai()).await.unwrap();
    h.session.edit("A clear sentence.").await;

    let outcome = h.session.run_eval("Clarity").await.unwrap();
    assert_eq!(outcome.score, Score::new(9).unwrap());

    let config = h.session.config().snapshot().await;
    assert_eq!(config.find_eval("Clarity").unwrap().score, Score::new(9));
    assert!(!config.find_eval("Interesting").unwrap().has_result());
    assert!(store.get_item(CONFIG_KEY).unwrap().is_none());

    h.session.edit("A clear sentence, edited.").await;
    let config = h.session.config().snapshot().await;
    assert!(config.evals.iter().all(|e| !e.has_result()));
}

#[tokio::test]
async fn eval_outcome_for_replaced_text_is_not_recorded() {
    let server = MockServer::start().await;
    mount_connect(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submit_eval"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(serde_json::json!({
                    "success": true,
                    "score": 3,
                    "result": "Rating: 3/10."
                })),
        )
        .mount(&server)
        .await;

    let h = start(&server, Arc::new(MemoryKeyValueStore::new())).await;
    h.session.connect(openai()).await.unwrap();
    h.session.edit("First draft.").await;

    let (outcome, _) = tokio::join!(h.session.run_eval("Clarity"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        h.session.edit("Second draft, rewritten.").await;
    });

    assert_eq!(outcome.unwrap().score, Score::new(3).unwrap());
    let config = h.session.config().snapshot().await;
    assert!(!config.find_eval("Clarity").unwrap().has_result());
}

#[tokio::test]
async fn failed_eval_leaves_state_untouched() {
    let server = MockServer::start().await;
    mount_connect(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submit_eval"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "No active LLM connection"})),
        )
        .mount(&server)
        .await;

    let h = start(&server, Arc::new(MemoryKeyValueStore::new())).await;
    h.session.connect(openai()).await.unwrap();
    h.session.edit("Text").await;

    let err = h.session.run_eval("Spammy").await.unwrap_err();
    assert_eq!(err.to_string(), "No active LLM connection");
    assert!(h.session.config().snapshot().await.evals.iter().all(|e| !e.has_result()));
    assert!(!h.session.is_processing());
}

#[tokio::test]
async fn unknown_action_is_reported() {
    let server = MockServer::start().await;
    let h = start(&server, Arc::new(MemoryKeyValueStore::new())).await;

    let err = h.session.run_action("Translate").await.unwrap_err();
    assert!(matches!(err, DispatchError::UnknownItem { kind: "action", .. }));
}

#[tokio::test]
async fn failed_connect_leaves_session_disconnected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/connect_llm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "OpenAI connection error: invalid key"
        })))
        .mount(&server)
        .await;

    let h = start(&server, Arc::new(MemoryKeyValueStore::new())).await;
    let err = h.session.connect(openai()).await.unwrap_err();
    assert_eq!(err.message, "OpenAI connection error: invalid key");
    assert!(!h.session.connection().is_connected().await);
}

#[tokio::test]
async fn chat_sends_editor_context_and_handles_failure() {
    let server = MockServer::start().await;
    mount_connect(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .and(body_partial_json(serde_json::json!({
            "message": "Is this good?",
            "context": "Current editor content: Draft one"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "Yes."})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .and(body_partial_json(serde_json::json!({"message": "And now?"})))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let h = start(&server, Arc::new(MemoryKeyValueStore::new())).await;
    h.session.connect(openai()).await.unwrap();
    h.session.edit("Draft one").await;

    assert!(matches!(h.session.send_chat("Is this good?").await, SendOutcome::Replied(ref m) if m.text == "Yes."));
    assert!(matches!(h.session.send_chat("And now?").await, SendOutcome::Failed(_)));

    let log = h.session.chat().messages().await;
    assert_eq!(log.len(), 5);
    assert_eq!(log[4].text, CHAT_ERROR_REPLY);
}

#[tokio::test]
async fn unavailable_storage_still_runs_in_memory() {
    let server = MockServer::start().await;
    let h = start(&server, Arc::new(MemoryKeyValueStore::unavailable())).await;

    let documents = h.session.documents().documents().await;
    assert_eq!(documents.len(), 1);

    h.session.edit("kept in memory").await;
    h.session.close().await;
    assert_eq!(
        h.session.documents().selected().await.unwrap().content,
        "kept in memory"
    );
}
