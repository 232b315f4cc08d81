//! Scripted backend for unit tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use cowriter_core::llm::LlmConnection;
use cowriter_interaction::dto::{
    ChatRequest, ConnectLlmRequest, ConnectLlmResponse, EvalResponse, HealthResponse,
    SubmitActionRequest, SubmitEvalRequest,
};
use cowriter_interaction::{BackendClient, BackendError};

use crate::connection::ConnectionManager;

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub connect_success: bool,
    pub connect_message: Option<String>,
    /// Every text request fails with this status and detail
    pub failure: Option<(u16, Option<String>)>,
    pub action_text: String,
    pub eval_score: Option<f64>,
    pub eval_result: String,
    pub chat_reply: String,
    /// Requests wait for a notification before answering
    pub gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
    pub last_action: Mutex<Option<SubmitActionRequest>>,
    pub last_eval: Mutex<Option<SubmitEvalRequest>>,
    pub last_chat: Mutex<Option<ChatRequest>>,
}

impl FakeBackend {
    pub fn connected() -> Self {
        Self {
            connect_success: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.failure {
            Some((status, message)) => Err(BackendError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BackendClient for FakeBackend {
    async fn connect_llm(
        &self,
        _request: &ConnectLlmRequest,
    ) -> Result<ConnectLlmResponse, BackendError> {
        Ok(ConnectLlmResponse {
            success: self.connect_success,
            message: self.connect_message.clone(),
        })
    }

    async fn submit_action(&self, request: &SubmitActionRequest) -> Result<String, BackendError> {
        *self.last_action.lock().unwrap() = Some(request.clone());
        self.enter().await?;
        Ok(self.action_text.clone())
    }

    async fn submit_eval(&self, request: &SubmitEvalRequest) -> Result<EvalResponse, BackendError> {
        *self.last_eval.lock().unwrap() = Some(request.clone());
        self.enter().await?;
        Ok(EvalResponse {
            score: self.eval_score,
            result: self.eval_result.clone(),
        })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        *self.last_chat.lock().unwrap() = Some(request.clone());
        self.enter().await?;
        Ok(self.chat_reply.clone())
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        Ok(HealthResponse {
            status: "healthy".into(),
            llm_connected: self.connect_success,
            llm_type: None,
        })
    }
}

pub(crate) fn openai() -> LlmConnection {
    LlmConnection::OpenAi {
        api_key: "sk-test".into(),
    }
}

/// A connection manager already connected through `backend`.
pub(crate) async fn connected_manager(backend: Arc<FakeBackend>) -> Arc<ConnectionManager> {
    let manager = Arc::new(ConnectionManager::new(backend));
    manager.connect(openai()).await.unwrap();
    manager
}
