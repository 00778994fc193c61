//! Core data model types for goquiz.
//!
//! Question records come from the external question bank; answer records,
//! credentials, and notifications are produced by the quiz and auth flows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One question from the bank.
///
/// The serialized form matches the bank's JSON layout
/// (`_id`, `question`, `options[].isCorrect`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Dense, 0-based position of the question in the bank.
    #[serde(rename = "_id")]
    pub id: usize,
    /// Question text, without the trailing question mark.
    #[serde(rename = "question")]
    pub text: String,
    /// Answer options in display order.
    pub options: Vec<AnswerOption>,
}

/// A single selectable answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

/// The user's recorded answer for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: usize,
    pub question_text: String,
    pub is_correct: bool,
}

/// The authenticated user, as returned by the authentication endpoint.
///
/// Any fields beyond `name` and `email` (session tokens and the like) are
/// kept opaque and written back verbatim when the record is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Payload for the login endpoint.
///
/// Note: Custom Debug impl masks the password so it never reaches logs.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Payload for the registration endpoint.
///
/// `confirm_password` only exists for the form's benefit and is never sent.
#[derive(Clone, Serialize)]
pub struct RegisterCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .finish()
    }
}

/// Payload for the mail dispatch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub html: String,
}
