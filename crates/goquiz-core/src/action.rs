//! Async actions: one remote operation with loading/error lifecycle.
//!
//! An action allows at most one invocation in flight. Triggers that arrive
//! while a request is outstanding are ignored rather than queued, which is
//! what a disabled submit button amounts to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::error::ActionError;
use crate::traits::{Method, RemoteRequest, Transport};

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    /// The request succeeded; holds the success callback's return value.
    Succeeded(T),
    /// The request failed; the error is also kept on the action.
    Failed(ActionError),
    /// Another invocation was already in flight; nothing was sent.
    Skipped,
    /// The owning screen went away. Either nothing was sent, or the response
    /// arrived afterwards and was discarded; the success callback did not run.
    Detached,
}

impl<T> ActionOutcome<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, ActionOutcome::Succeeded(_))
    }
}

/// Stateful wrapper around one remote call.
pub struct AsyncAction {
    name: &'static str,
    method: Method,
    endpoint: String,
    transport: Arc<dyn Transport>,
    loading: AtomicBool,
    detached: AtomicBool,
    error: Mutex<Option<ActionError>>,
}

/// Clears the loading flag however the invocation ends, including when its
/// future is dropped mid-request.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AsyncAction {
    pub fn new(
        name: &'static str,
        method: Method,
        endpoint: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            name,
            method,
            endpoint: endpoint.into(),
            transport,
            loading: AtomicBool::new(false),
            detached: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    /// Shorthand for a POST action, which is every action the app uses.
    pub fn post(name: &'static str, endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self::new(name, Method::Post, endpoint, transport)
    }

    /// Send `payload` and run `on_success` with the response body if the
    /// request succeeds.
    pub async fn invoke<P, F, R>(&self, payload: &P, on_success: F) -> ActionOutcome<R>
    where
        P: Serialize + ?Sized,
        F: FnOnce(serde_json::Value) -> R,
    {
        if self.detached.load(Ordering::Acquire) {
            tracing::debug!(action = self.name, "action detached, not sending");
            return ActionOutcome::Detached;
        }
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(action = self.name, "request already in flight, ignoring trigger");
            return ActionOutcome::Skipped;
        }
        let in_flight = InFlight(&self.loading);

        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                let err = ActionError::Decode(format!("failed to encode request: {e}"));
                self.set_error(Some(err.clone()));
                return ActionOutcome::Failed(err);
            }
        };

        let request = RemoteRequest {
            method: self.method,
            endpoint: self.endpoint.clone(),
            body,
        };
        tracing::debug!(action = self.name, endpoint = %self.endpoint, "sending request");
        let result = self.transport.send(&request).await;
        drop(in_flight);

        if self.detached.load(Ordering::Acquire) {
            tracing::debug!(action = self.name, "request completed after detach, discarding");
            return ActionOutcome::Detached;
        }

        match result {
            Ok(response) => {
                self.set_error(None);
                ActionOutcome::Succeeded(on_success(response))
            }
            Err(err) => {
                tracing::warn!(action = self.name, error = %err, "request failed");
                self.set_error(Some(err.clone()));
                ActionOutcome::Failed(err)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Whether the action's trigger should be enabled.
    pub fn is_enabled(&self) -> bool {
        !self.is_loading() && !self.detached.load(Ordering::Acquire)
    }

    /// The last failure, if it has not been cleared by a success or dismissed.
    pub fn error(&self) -> Option<ActionError> {
        self.error_slot().clone()
    }

    /// Dismiss the error banner.
    pub fn dismiss_error(&self) {
        self.set_error(None);
    }

    /// Mark the owning screen as gone. Completions arriving afterwards are
    /// discarded.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }

    fn set_error(&self, error: Option<ActionError>) {
        *self.error_slot() = error;
    }

    fn error_slot(&self) -> MutexGuard<'_, Option<ActionError>> {
        self.error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
