use std::collections::BTreeMap;

use async_trait::async_trait;

/// Kind of user interaction an event handler can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

/// Read access to an element's form fields and attributes.
///
/// Handlers only see elements through this trait, so they can run against
/// a snapshot built in a test or by the terminal front end.
pub trait FormReader: Send + Sync {
    /// Value of the named form field, if the element carries one.
    fn field(&self, name: &str) -> Option<&str>;

    /// Value of the named attribute on the element itself.
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Snapshot of the element an event fired on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    fields: Vec<(String, String)>,
    attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a form field. Later duplicates are shadowed by the first one,
    /// matching how form data lookups behave.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl FormReader for Element {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// An interaction delivered to the registry.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    /// Selector of the element the handler was bound to, e.g. `#updateBookForm`.
    pub target: String,
    pub element: Element,
}

impl Event {
    pub fn click(target: impl Into<String>, element: Element) -> Self {
        Self {
            kind: EventKind::Click,
            target: target.into(),
            element,
        }
    }

    pub fn submit(target: impl Into<String>, element: Element) -> Self {
        Self {
            kind: EventKind::Submit,
            target: target.into(),
            element,
        }
    }
}

/// Whether the host should still perform its default action (navigation,
/// form submission) after the handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    PreventDefault,
}

/// Coarse result of a handler run, for reporting by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Declined,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub flow: Flow,
    pub outcome: Outcome,
}

impl Handled {
    pub fn prevent_default(outcome: Outcome) -> Self {
        Self {
            flow: Flow::PreventDefault,
            outcome,
        }
    }
}

/// Callback bound to an element and event kind through the registry.
#[async_trait]
pub trait EventHandler: Sync + Send {
    /// Unique name for this handler, used in logs and reports
    fn name(&self) -> &'static str;

    /// React to the event. Failures are surfaced by the handler itself and
    /// summarized in the returned outcome.
    async fn handle(&self, event: &Event) -> Handled;
}
