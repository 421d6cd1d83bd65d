pub mod delete;
pub mod models;
pub mod requests;
pub mod update;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use bookdesk_http::Transport;
use bookdesk_kernel::{settings::Settings, EventKind, EventRegistry, Page};

use crate::utils;

pub use delete::{DeleteHandler, DeleteOutcome};
pub use models::{BookId, UpdatePayload, BOOK_ID_ATTRIBUTE};
pub use update::{UpdateHandler, UpdateOutcome};

/// Selector of the delete buttons on the listing page.
pub const DELETE_TARGET: &str = ".delete-book";
/// Selector of the book edit form.
pub const UPDATE_FORM_TARGET: &str = "#updateBookForm";

/// The books handlers, kept as concrete types so callers can also invoke
/// them directly.
#[derive(Clone)]
pub struct BooksHandlers {
    pub delete: Arc<DeleteHandler>,
    pub update: Arc<UpdateHandler>,
}

impl BooksHandlers {
    pub fn new(transport: Arc<dyn Transport>, page: Page, settings: &Settings) -> Self {
        Self {
            delete: Arc::new(DeleteHandler::new(
                transport.clone(),
                page.clone(),
                settings.messages.clone(),
            )),
            update: Arc::new(UpdateHandler::new(
                transport,
                page,
                settings.messages.clone(),
                settings.backend.listing_path.clone(),
            )),
        }
    }

    /// Bind the delete buttons and the edit form.
    pub fn register(&self, registry: &mut EventRegistry) {
        let prefix = utils::log_prefix("books");
        registry.register(DELETE_TARGET, EventKind::Click, self.delete.clone());
        registry.register(UPDATE_FORM_TARGET, EventKind::Submit, self.update.clone());
        tracing::info!(target: "project.handlers", %prefix, "books handlers registered");
    }
}
