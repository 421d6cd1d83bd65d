//! In-memory stand-ins for the page and the backend.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bookdesk_http::{ApiRequest, ApiResponse, ReqwestTransport, RequestError, Transport};
use bookdesk_kernel::{Console, Dialogs, Navigator, Page};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Nothing listens here, so connecting fails right away.
const DEAD_BACKEND: &str = "http://127.0.0.1:1";

enum Reply {
    Status(u16),
    Unreachable,
}

/// Answers with scripted statuses (200 once the script runs out) and keeps
/// every request it was given.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    script: Mutex<VecDeque<Reply>>,
    gate: Option<Arc<Notify>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(status: u16) -> Self {
        let transport = Self::default();
        transport.script.lock().push_back(Reply::Status(status));
        transport
    }

    /// Send the next request to an address nothing listens on, so it fails
    /// with a real connection error.
    pub fn unreachable() -> Self {
        let transport = Self::default();
        transport.script.lock().push_back(Reply::Unreachable);
        transport
    }

    /// Hold every request until `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError> {
        self.requests.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.script.lock().pop_front();
        match next {
            Some(Reply::Status(status)) => Ok(ApiResponse::new(status)),
            Some(Reply::Unreachable) => {
                ReqwestTransport::new(DEAD_BACKEND, None)?
                    .send(request)
                    .await
            }
            None => Ok(ApiResponse::new(200)),
        }
    }
}

pub struct ScriptedDialogs {
    answer: bool,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: Mutex::default(),
            alerts: Mutex::default(),
        }
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub reloads: Mutex<usize>,
    pub assigned: Mutex<Vec<String>>,
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn reload(&self) {
        *self.reloads.lock() += 1;
    }

    async fn assign(&self, path: &str) {
        self.assigned.lock().push(path.to_string());
    }
}

#[derive(Default)]
pub struct RecordingConsole {
    pub errors: Mutex<Vec<String>>,
}

impl Console for RecordingConsole {
    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}

/// A page wired to recording capabilities, with handles kept for assertions.
pub struct FakePage {
    pub dialogs: Arc<ScriptedDialogs>,
    pub navigator: Arc<RecordingNavigator>,
    pub console: Arc<RecordingConsole>,
}

impl FakePage {
    pub fn confirming(answer: bool) -> Self {
        Self {
            dialogs: Arc::new(ScriptedDialogs::answering(answer)),
            navigator: Arc::default(),
            console: Arc::default(),
        }
    }

    pub fn page(&self) -> Page {
        Page::new(
            self.dialogs.clone(),
            self.navigator.clone(),
            self.console.clone(),
        )
    }

    pub fn reloads(&self) -> usize {
        *self.navigator.reloads.lock()
    }

    pub fn assigned(&self) -> Vec<String> {
        self.navigator.assigned.lock().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.dialogs.alerts.lock().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.dialogs.confirms.lock().clone()
    }

    pub fn console_errors(&self) -> Vec<String> {
        self.console.errors.lock().clone()
    }
}
