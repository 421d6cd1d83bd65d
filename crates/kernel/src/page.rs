use std::sync::Arc;

use async_trait::async_trait;

/// Modal dialogs shown to the user.
pub trait Dialogs: Send + Sync {
    /// Ask a yes/no question. Returns `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;

    /// Show a notification the user has to acknowledge.
    fn alert(&self, message: &str);
}

/// Control over the current page location.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Reload the current location.
    async fn reload(&self);

    /// Leave the current location for `path`.
    async fn assign(&self, path: &str);
}

/// Diagnostic channel that is never shown to the user.
pub trait Console: Send + Sync {
    fn error(&self, message: &str);
}

/// Console that writes to the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn error(&self, message: &str) {
        tracing::error!(target: "bookdesk::console", "{message}");
    }
}

/// Capabilities a handler needs from the page it runs in.
#[derive(Clone)]
pub struct Page {
    pub dialogs: Arc<dyn Dialogs>,
    pub navigator: Arc<dyn Navigator>,
    pub console: Arc<dyn Console>,
}

impl Page {
    pub fn new(
        dialogs: Arc<dyn Dialogs>,
        navigator: Arc<dyn Navigator>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            dialogs,
            navigator,
            console,
        }
    }
}
