//! Core types shared by bookdesk crates: layered settings, the event model,
//! the handler registry, and the page capabilities handlers are given.

pub mod event;
pub mod page;
pub mod registry;
pub mod settings;

pub use event::{Element, Event, EventHandler, EventKind, Flow, FormReader, Handled, Outcome};
pub use page::{Console, Dialogs, Navigator, Page, TracingConsole};
pub use registry::{Dispatch, EventRegistry, HandlerReport};
