// ABOUTME: Ask module: the boundary to the external question-answering action.
// ABOUTME: Defines the AskAction trait, the AskError taxonomy, and fallback answer resolution.

pub mod convex;
pub mod echo;
pub mod provider;

use async_trait::async_trait;

pub use provider::create_action;

/// Answer shown whenever the ask action fails or returns nothing usable.
pub const FALLBACK_ANSWER: &str = "Sorry, something went wrong.";

/// Failure modes of an ask action. The widget renders all of them as
/// [`FALLBACK_ANSWER`]; the distinction exists for logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AskError {
    /// The request did not complete within the configured timeout.
    #[error("ask request timed out")]
    Timeout,

    /// The request could not reach the backend or the connection broke.
    #[error("network failure: {0}")]
    Network(String),

    /// The backend answered but refused the action.
    #[error("action rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend response could not be understood.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl AskError {
    /// Stable short code used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network(_) => "network",
            Self::Rejected { .. } => "rejected",
            Self::Decode(_) => "decode",
            Self::ClientBuild(_) => "client_build",
        }
    }
}

/// An asynchronous question-answering action.
///
/// `Ok(None)` means the action ran but produced no answer.
#[async_trait]
pub trait AskAction: Send + Sync {
    async fn ask(&self, question: &str) -> Result<Option<String>, AskError>;

    /// Short human-readable name shown in the status bar.
    fn label(&self) -> String;
}

/// One submitted question waiting for its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AskTicket {
    pub request_id: u64,
    /// History generation at submission time; stale once history is cleared.
    pub generation: u64,
    pub question: String,
}

/// The outcome of running one ticket, delivered back to the event loop.
#[derive(Debug)]
pub struct Settlement {
    pub ticket: AskTicket,
    pub outcome: Result<Option<String>, AskError>,
}

/// Run the action for a ticket. Never fails: errors are carried in the settlement.
pub async fn run_ask(action: &dyn AskAction, ticket: AskTicket) -> Settlement {
    tracing::debug!(
        request_id = ticket.request_id,
        question_len = ticket.question.len(),
        "ask: dispatching"
    );
    let started = std::time::Instant::now();
    let outcome = action.ask(&ticket.question).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &outcome {
        Ok(Some(answer)) => tracing::info!(
            request_id = ticket.request_id,
            elapsed_ms,
            answer_len = answer.len(),
            "ask: answered"
        ),
        Ok(None) => tracing::warn!(
            request_id = ticket.request_id,
            elapsed_ms,
            "ask: action returned no answer"
        ),
        Err(e) => tracing::warn!(
            request_id = ticket.request_id,
            elapsed_ms,
            kind = e.kind(),
            error = %e,
            "ask: action failed"
        ),
    }

    Settlement { ticket, outcome }
}

/// Map an action outcome to the answer text the user sees.
pub fn resolve_answer(outcome: &Result<Option<String>, AskError>) -> String {
    match outcome {
        Ok(Some(answer)) if !answer.is_empty() => answer.clone(),
        _ => FALLBACK_ANSWER.to_string(),
    }
}
