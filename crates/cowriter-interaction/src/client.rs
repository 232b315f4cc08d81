//! HTTP client for the CoWriter backend.
//!
//! All requests go to `{backend_url}/api/v1/...` with a JSON body and, when a
//! token is stored, an `Authorization: Bearer` header.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use cowriter_core::auth::TokenProvider;
use cowriter_core::settings::AppSettings;

use crate::dto::{
    ChatRequest, ConnectLlmRequest, ConnectLlmResponse, ErrorBody, EvalResponse, HealthResponse,
    SubmitActionRequest, SubmitActionResponse, SubmitEvalRequest, SubmitEvalResponse,
    TextResponse,
};
use crate::error::BackendError;

/// Operations the application layer needs from the backend.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn connect_llm(
        &self,
        request: &ConnectLlmRequest,
    ) -> Result<ConnectLlmResponse, BackendError>;

    /// Returns the rewritten text.
    async fn submit_action(&self, request: &SubmitActionRequest) -> Result<String, BackendError>;

    async fn submit_eval(&self, request: &SubmitEvalRequest) -> Result<EvalResponse, BackendError>;

    /// Returns the assistant reply.
    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError>;

    async fn health(&self) -> Result<HealthResponse, BackendError>;
}

/// [`BackendClient`] over reqwest.
#[derive(Clone)]
pub struct HttpBackendClient {
    client: Client,
    api_base: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpBackendClient {
    /// Creates a client for `api_base` (already including `/api/v1`).
    pub fn new(
        api_base: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn from_settings(
        settings: &AppSettings,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, BackendError> {
        Self::new(settings.api_base_url(), settings.request_timeout(), tokens)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.bearer_token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("[HttpBackendClient] POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        decode(response).await
    }

    async fn get_json<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp, BackendError> {
        let url = self.url(path);
        tracing::debug!("[HttpBackendClient] GET {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        decode(response).await
    }
}

async fn decode<Resp: DeserializeOwned>(response: Response) -> Result<Resp, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_http_error(status.as_u16(), &body));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

fn map_http_error(status: u16, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);
    BackendError::Status { status, message }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn connect_llm(
        &self,
        request: &ConnectLlmRequest,
    ) -> Result<ConnectLlmResponse, BackendError> {
        self.post_json("connect_llm", request).await
    }

    async fn submit_action(&self, request: &SubmitActionRequest) -> Result<String, BackendError> {
        let response: SubmitActionResponse = self.post_json("submit_action", request).await?;
        if response.success == Some(false) {
            return Err(BackendError::Rejected {
                message: response.detail,
            });
        }
        response
            .text
            .ok_or_else(|| BackendError::Decode("action response has no text".into()))
    }

    async fn submit_eval(&self, request: &SubmitEvalRequest) -> Result<EvalResponse, BackendError> {
        let response: SubmitEvalResponse = self.post_json("submit_eval", request).await?;
        if response.success == Some(false) {
            return Err(BackendError::Rejected {
                message: response.detail,
            });
        }
        let result = response
            .result
            .ok_or_else(|| BackendError::Decode("eval response has no result".into()))?;
        Ok(EvalResponse {
            score: response.score,
            result,
        })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let response: TextResponse = self.post_json("chat", request).await?;
        Ok(response.text)
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        self.get_json("health").await
    }
}
