//! Test doubles shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::error::ActionError;
use crate::session::MemorySessionStore;
use crate::traits::{Endpoints, Navigator, RemoteRequest, Screen, Transport};
use crate::Services;

/// Replies from a script, in order; `{}` once the script runs out.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<serde_json::Value, ActionError>>>,
    delay: Duration,
    calls: AtomicU32,
    requests: Mutex<Vec<RemoteRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<serde_json::Value, ActionError>>) -> Arc<Self> {
        Self::with_delay(replies, Duration::ZERO)
    }

    pub fn with_delay(
        replies: Vec<Result<serde_json::Value, ActionError>>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            delay,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, request: &RemoteRequest) -> Result<serde_json::Value, ActionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

/// Remembers every navigation.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<(Screen, bool)>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<(Screen, bool)> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: Screen, replace: bool) {
        self.visits.lock().unwrap().push((target, replace));
    }
}

/// Services wired to test doubles, plus handles to inspect them.
pub struct Harness {
    pub services: Services,
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(transport: Arc<ScriptedTransport>, store: MemorySessionStore) -> Harness {
    let store = Arc::new(store);
    let navigator = Arc::new(RecordingNavigator::default());
    let services = Services {
        transport: transport.clone(),
        store: store.clone(),
        navigator: navigator.clone(),
        endpoints: Endpoints::default(),
    };
    Harness {
        services,
        transport,
        store,
        navigator,
    }
}
