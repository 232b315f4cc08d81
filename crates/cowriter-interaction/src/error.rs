//! Errors returned by the backend client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced an HTTP response.
    #[error("Request to backend failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}{}", fmt_detail(.message))]
    Status { status: u16, message: Option<String> },

    /// The backend answered 200 but flagged the request as failed.
    #[error("Backend rejected the request{}", fmt_detail(.message))]
    Rejected { message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

fn fmt_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl BackendError {
    /// Server-provided explanation, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { message, .. } | BackendError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Message to show the user: the server detail, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}
