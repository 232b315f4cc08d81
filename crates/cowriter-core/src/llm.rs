//! LLM connection settings.
//!
//! Connection details are held for the running session only and are never
//! persisted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which backend family to connect the service to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LlmKind {
    OpenAi,
    Llama,
}

/// Details needed by the backend to reach a language model.
#[derive(Clone, PartialEq, Eq)]
pub enum LlmConnection {
    /// Hosted OpenAI model
    OpenAi { api_key: String },
    /// Self-hosted llama server
    Llama { host: String, port: String },
}

impl LlmConnection {
    pub fn kind(&self) -> LlmKind {
        match self {
            LlmConnection::OpenAi { .. } => LlmKind::OpenAi,
            LlmConnection::Llama { .. } => LlmKind::Llama,
        }
    }
}

impl std::fmt::Debug for LlmConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmConnection::OpenAi { .. } => f
                .debug_struct("OpenAi")
                .field("api_key", &"<redacted>")
                .finish(),
            LlmConnection::Llama { host, port } => f
                .debug_struct("Llama")
                .field("host", host)
                .field("port", port)
                .finish(),
        }
    }
}
