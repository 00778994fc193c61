//! Mock transport for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use goquiz_core::error::ActionError;
use goquiz_core::traits::{RemoteRequest, Transport};

type Reply = Result<serde_json::Value, ActionError>;

/// A mock transport for driving screens without a server.
///
/// Replies are scripted per endpoint and consumed in order; the last reply
/// for an endpoint keeps being returned once the others are used up.
/// Endpoints with no script answer `{}`.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    latency: Duration,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Every request received, in order.
    requests: Mutex<Vec<RemoteRequest>>,
}

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `endpoint`.
    pub fn with_reply(self, endpoint: &str, reply: Reply) -> Self {
        locked(&self.replies)
            .entry(endpoint.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Get the number of calls made to this transport.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Number of calls made to one endpoint.
    pub fn calls_to(&self, endpoint: &str) -> usize {
        locked(&self.requests)
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .count()
    }

    /// Get the last request made to this transport.
    pub fn last_request(&self) -> Option<RemoteRequest> {
        locked(&self.requests).last().cloned()
    }

    fn next_reply(&self, endpoint: &str) -> Reply {
        let mut replies = locked(&self.replies);
        match replies.get_mut(endpoint) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| Ok(empty())),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| Ok(empty())),
            None => Ok(empty()),
        }
    }
}

fn empty() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: &RemoteRequest) -> Result<serde_json::Value, ActionError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        locked(&self.requests).push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.next_reply(&request.endpoint)
    }
}
