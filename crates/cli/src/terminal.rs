//! Page capabilities for a terminal session.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;
use bookdesk_http::{ApiRequest, Transport};
use bookdesk_kernel::{Dialogs, Navigator};
use parking_lot::Mutex;

/// Prompts on stderr and reads the answer from stdin.
pub struct TerminalDialogs {
    assume_yes: bool,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// `y`/`yes` in any case confirms, anything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Dialogs for TerminalDialogs {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(%message, "confirmation assumed");
            return true;
        }

        {
            let mut stderr = io::stderr().lock();
            if write!(stderr, "{message} [y/N] ")
                .and_then(|_| stderr.flush())
                .is_err()
            {
                return false;
            }
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Emulates page navigation by fetching locations from the backend.
pub struct HttpNavigator {
    transport: Arc<dyn Transport>,
    location: Mutex<String>,
}

impl HttpNavigator {
    pub fn new(transport: Arc<dyn Transport>, location: impl Into<String>) -> Self {
        Self {
            transport,
            location: Mutex::new(location.into()),
        }
    }

    pub fn location(&self) -> String {
        self.location.lock().clone()
    }

    async fn visit(&self, path: &str) {
        match self.transport.send(ApiRequest::get(path)).await {
            Ok(response) if response.is_ok() => {
                tracing::info!(path, status = response.status, "page loaded");
                println!("{path}");
            }
            Ok(response) => {
                tracing::warn!(path, status = response.status, "page answered with an error");
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "page could not be loaded");
            }
        }
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    async fn reload(&self) {
        let location = self.location();
        self.visit(&location).await;
    }

    async fn assign(&self, path: &str) {
        *self.location.lock() = path.to_string();
        self.visit(path).await;
    }
}
