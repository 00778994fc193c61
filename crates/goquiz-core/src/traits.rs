//! Collaborator seams the core is driven through.
//!
//! The remote service, the persisted identity slot, and screen navigation are
//! all external; `goquiz-client` and the CLI provide the concrete
//! implementations.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::model::UserRecord;

// ---------------------------------------------------------------------------
// Remote requests
// ---------------------------------------------------------------------------

/// Generic request primitive for the authentication and notification service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name (e.g. "http").
    fn name(&self) -> &str;

    /// Perform one request and return the decoded JSON response body.
    async fn send(&self, request: &RemoteRequest) -> Result<serde_json::Value, ActionError>;
}

/// HTTP-style request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single request handed to a [`Transport`].
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteRequest {
    pub method: Method,
    /// Path relative to the service's base URL (e.g. "/api/auth/login").
    pub endpoint: String,
    /// JSON payload.
    pub body: serde_json::Value,
}

// Bodies carry passwords; only the route is printed.
impl fmt::Debug for RemoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRequest")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Paths of the remote operations the application uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub login: String,
    pub register: String,
    pub mail: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/api/auth/login".to_string(),
            register: "/api/auth/register".to_string(),
            mail: "/api/mail/send".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session identity
// ---------------------------------------------------------------------------

/// Persisted slot holding the authenticated user, if any.
///
/// An empty slot is an ordinary state, not an error; `Err` is reserved for
/// storage failures.
pub trait SessionStore: Send + Sync {
    /// Read the current user record.
    fn get(&self) -> anyhow::Result<Option<UserRecord>>;

    /// Write the user record, replacing any previous one.
    fn set(&self, user: &UserRecord) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Screens the application can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Entry screen with the login and registration widgets.
    Home,
    /// The quiz.
    Quiz,
}

impl Screen {
    /// Route path of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Quiz => "/quiz",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// External navigation capability.
pub trait Navigator: Send + Sync {
    /// Move to `target`; `replace` swaps out the current history entry.
    fn navigate(&self, target: Screen, replace: bool);
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// The collaborators a screen is built with.
#[derive(Clone)]
pub struct Services {
    pub transport: Arc<dyn Transport>,
    pub store: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub endpoints: Endpoints,
}
