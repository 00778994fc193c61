//! Error types for remote calls, forms, and quiz transitions.
//!
//! Invalid field input is deliberately absent here: a field that fails its
//! rule is steady state, tracked on the field itself.

use thiserror::Error;

/// Banner text used when a failure carries no server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again.";

/// Errors produced by an [`AsyncAction`](crate::action::AsyncAction) invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The server answered with a failure status.
    ///
    /// `message` is the display-ready text extracted from the response body,
    /// if the body carried one.
    #[error("server error (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// Credentials were rejected (HTTP 401).
    #[error("unauthorized: {}", .0.as_deref().unwrap_or("no message"))]
    Unauthorized(Option<String>),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered successfully but the body could not be understood.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ActionError {
    /// The message shown in the screen's dismissible banner.
    pub fn display_message(&self) -> &str {
        match self {
            ActionError::Server {
                message: Some(m), ..
            }
            | ActionError::Unauthorized(Some(m)) => m,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Returns `true` if the request failed before a response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, ActionError::Timeout(_) | ActionError::Network(_))
    }
}

/// Errors from addressing a form incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The form has no field with this name.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Errors from driving the quiz session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The action is not valid in the session's current state.
    #[error("cannot {action} while quiz is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// `next` was requested before an answer was selected for this question.
    #[error("select an answer before moving to the next question")]
    NextDisabled,

    /// `prev` was requested on the first question.
    #[error("already at the first question")]
    PrevDisabled,

    /// An answer was submitted for a question other than the one displayed.
    #[error("question {got} is not the displayed question ({expected})")]
    QuestionMismatch { expected: usize, got: usize },

    /// The selected option does not exist on the question.
    #[error("question {question_id} has no option {option_index}")]
    UnknownOption {
        question_id: usize,
        option_index: usize,
    },

    /// A quiz cannot be built from zero questions.
    #[error("question bank is empty")]
    EmptyBank,
}
