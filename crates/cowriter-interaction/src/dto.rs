//! Request and response bodies of the backend API.

use serde::{Deserialize, Serialize};

use cowriter_core::config::{Tone, WritingStyle};
use cowriter_core::document::DocumentType;
use cowriter_core::llm::{LlmConnection, LlmKind};

/// Body of `POST /connect_llm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectLlmRequest {
    #[serde(rename = "openai")]
    OpenAi { api_key: String },
    Llama { host: String, port: String },
}

impl From<&LlmConnection> for ConnectLlmRequest {
    fn from(connection: &LlmConnection) -> Self {
        match connection {
            LlmConnection::OpenAi { api_key } => ConnectLlmRequest::OpenAi {
                api_key: api_key.clone(),
            },
            LlmConnection::Llama { host, port } => ConnectLlmRequest::Llama {
                host: host.clone(),
                port: port.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectLlmResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /submit_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitActionRequest {
    /// Lowercased action name
    pub action: String,
    /// Instruction phrased for the document type
    pub action_description: String,
    pub text: String,
    pub about_me: String,
    pub preferred_style: WritingStyle,
    pub tone: Tone,
    pub document_type: DocumentType,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SubmitActionResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of `POST /submit_eval`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitEvalRequest {
    /// Lowercased eval name
    pub eval_name: String,
    pub eval_description: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SubmitEvalResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Successful eval run as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResponse {
    /// Raw backend score, on whatever scale the backend uses
    pub score: Option<f64>,
    pub result: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextResponse {
    pub text: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub llm_connected: bool,
    #[serde(default)]
    pub llm_type: Option<LlmKind>,
}

/// FastAPI-style error body. `detail` is a string for handled errors and a
/// list for validation failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) => Some(detail),
            _ => self.message,
        }
    }
}
