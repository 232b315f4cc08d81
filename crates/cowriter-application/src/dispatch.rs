//! Action and eval dispatch to the backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use cowriter_core::config::{ActionButton, EvalItem, Tone, WritingStyle};
use cowriter_core::document::DocumentType;
use cowriter_core::prompt::describe_action;
use cowriter_core::score::{Score, extract_score_from_result};
use cowriter_interaction::BackendClient;
use cowriter_interaction::dto::{SubmitActionRequest, SubmitEvalRequest};

use crate::connection::ConnectionManager;

pub const ACTION_FAILED_MESSAGE: &str = "Failed to process action";
pub const EVAL_FAILED_MESSAGE: &str = "Failed to process evaluation";

/// Why an action or eval did not produce a result. `Display` is the
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Please connect to an LLM first")]
    NotConnected,
    #[error("Please enter some text in the editor first")]
    EmptyDocument,
    #[error("Another request is already in progress")]
    Busy,
    #[error("No {kind} named '{key}'")]
    UnknownItem { kind: &'static str, key: String },
    #[error("{message}")]
    Backend { message: String },
}

/// What an action is applied to.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub text: String,
    pub about_me: String,
    pub preferred_style: WritingStyle,
    pub tone: Tone,
    pub document_type: DocumentType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOutcome {
    pub score: Score,
    pub result: String,
}

/// Sends actions and evals, one at a time.
pub struct Dispatcher {
    client: Arc<dyn BackendClient>,
    connection: Arc<ConnectionManager>,
    processing: AtomicBool,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn BackendClient>, connection: Arc<ConnectionManager>) -> Self {
        Self {
            client,
            connection,
            processing: AtomicBool::new(false),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Runs `action` against `context.text` and returns the rewritten text.
    pub async fn run_action(
        &self,
        action: &ActionButton,
        context: ActionContext,
    ) -> Result<String, DispatchError> {
        self.check_preconditions(&context.text).await?;
        let _guard = ProcessingGuard::acquire(&self.processing)?;

        let request = SubmitActionRequest {
            action: action.name.to_lowercase(),
            action_description: describe_action(&action.action, context.document_type),
            text: context.text,
            about_me: context.about_me,
            preferred_style: context.preferred_style,
            tone: context.tone,
            document_type: context.document_type,
        };
        tracing::debug!(
            "[Dispatcher] Running action '{}' for {}",
            request.action,
            request.document_type
        );

        self.client.submit_action(&request).await.map_err(|e| {
            tracing::error!("[Dispatcher] Action '{}' failed: {}", request.action, e);
            DispatchError::Backend {
                message: e.user_message(ACTION_FAILED_MESSAGE),
            }
        })
    }

    /// Runs `eval` against `text`.
    ///
    /// The backend score is used when it is on a known scale; otherwise the
    /// score is recovered from the result text.
    pub async fn run_eval(&self, eval: &EvalItem, text: &str) -> Result<EvalOutcome, DispatchError> {
        self.check_preconditions(text).await?;
        let _guard = ProcessingGuard::acquire(&self.processing)?;

        let request = SubmitEvalRequest {
            eval_name: eval.name.to_lowercase(),
            eval_description: eval.description.clone(),
            text: text.to_string(),
        };
        tracing::debug!("[Dispatcher] Running eval '{}'", request.eval_name);

        let response = self.client.submit_eval(&request).await.map_err(|e| {
            tracing::error!("[Dispatcher] Eval '{}' failed: {}", request.eval_name, e);
            DispatchError::Backend {
                message: e.user_message(EVAL_FAILED_MESSAGE),
            }
        })?;

        let score = response
            .score
            .and_then(Score::from_backend)
            .unwrap_or_else(|| extract_score_from_result(&response.result));

        Ok(EvalOutcome {
            score,
            result: response.result,
        })
    }

    async fn check_preconditions(&self, text: &str) -> Result<(), DispatchError> {
        if !self.connection.is_connected().await {
            return Err(DispatchError::NotConnected);
        }
        if text.trim().is_empty() {
            return Err(DispatchError::EmptyDocument);
        }
        Ok(())
    }
}

/// Holds the processing flag for the lifetime of one request.
pub(crate) struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }

    fn acquire(flag: &'a AtomicBool) -> Result<Self, DispatchError> {
        Self::try_acquire(flag).ok_or(DispatchError::Busy)
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
