use std::sync::Arc;

use crate::event::{Event, EventHandler, EventKind, Flow, Outcome};

struct Binding {
    target: String,
    kind: EventKind,
    handler: Arc<dyn EventHandler>,
}

/// What a single handler reported during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerReport {
    pub handler: &'static str,
    pub outcome: Outcome,
}

/// Result of dispatching one event to every matching handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub default_prevented: bool,
    pub reports: Vec<HandlerReport>,
}

impl Dispatch {
    /// True when any handler reported a failure.
    pub fn has_failures(&self) -> bool {
        self.reports
            .iter()
            .any(|report| matches!(report.outcome, Outcome::Failed(_)))
    }
}

/// Explicit registration of handlers against element selectors and event kinds
#[derive(Default)]
pub struct EventRegistry {
    bindings: Vec<Binding>,
}

impl EventRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a handler to `kind` events fired on `target`
    pub fn register(
        &mut self,
        target: impl Into<String>,
        kind: EventKind,
        handler: Arc<dyn EventHandler>,
    ) {
        let target = target.into();
        tracing::debug!(
            handler = handler.name(),
            selector = %target,
            kind = ?kind,
            "registering event handler"
        );
        self.bindings.push(Binding {
            target,
            kind,
            handler,
        });
    }

    /// Handlers bound to `target`/`kind`, in registration order
    pub fn handlers_for(&self, target: &str, kind: EventKind) -> Vec<&Arc<dyn EventHandler>> {
        self.bindings
            .iter()
            .filter(|binding| binding.target == target && binding.kind == kind)
            .map(|binding| &binding.handler)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Run every handler bound to the event's target and kind
    pub async fn dispatch(&self, event: &Event) -> Dispatch {
        let handlers = self.handlers_for(&event.target, event.kind);
        if handlers.is_empty() {
            tracing::debug!(
                selector = %event.target,
                kind = ?event.kind,
                "no handler bound for event"
            );
            return Dispatch::default();
        }

        let mut dispatch = Dispatch::default();
        for handler in handlers {
            tracing::debug!(handler = handler.name(), "dispatching event");

            let handled = handler.handle(event).await;
            if handled.flow == Flow::PreventDefault {
                dispatch.default_prevented = true;
            }
            dispatch.reports.push(HandlerReport {
                handler: handler.name(),
                outcome: handled.outcome,
            });
        }

        dispatch
    }
}
