use std::sync::Arc;

use async_trait::async_trait;
use bookdesk_http::{ApiResponse, RequestError, Transport};
use bookdesk_kernel::{settings::MessageSettings, Event, EventHandler, Handled, Outcome, Page};

use super::models::BookId;
use super::requests;
use crate::utils::InFlight;

/// What happened to a delete action.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user answered no to the confirmation dialog.
    Declined,
    /// A delete for the same book is still waiting for the backend.
    Busy,
    Deleted,
    Failed(RequestError),
    /// The action did not name a book.
    Invalid(String),
}

impl DeleteOutcome {
    pub fn summary(&self) -> Outcome {
        match self {
            DeleteOutcome::Declined => Outcome::Declined,
            DeleteOutcome::Busy => Outcome::Skipped,
            DeleteOutcome::Deleted => Outcome::Completed,
            DeleteOutcome::Failed(err) => Outcome::Failed(err.to_string()),
            DeleteOutcome::Invalid(reason) => Outcome::Failed(reason.clone()),
        }
    }
}

/// Deletes a book after the user confirms, then reloads the listing.
pub struct DeleteHandler {
    transport: Arc<dyn Transport>,
    page: Page,
    messages: MessageSettings,
    in_flight: InFlight,
}

impl DeleteHandler {
    pub fn new(transport: Arc<dyn Transport>, page: Page, messages: MessageSettings) -> Self {
        Self {
            transport,
            page,
            messages,
            in_flight: InFlight::new(),
        }
    }

    pub async fn delete_book(&self, id: &BookId) -> DeleteOutcome {
        if id.is_blank() {
            tracing::warn!("delete requested without a book id");
            return DeleteOutcome::Invalid("missing book id".to_string());
        }

        let Some(_guard) = self.in_flight.try_begin(id.as_str()) else {
            tracing::debug!(book_id = %id, "delete already in flight, ignoring");
            return DeleteOutcome::Busy;
        };

        if !self.page.dialogs.confirm(&self.messages.delete_confirm) {
            tracing::info!(book_id = %id, "book deletion declined");
            return DeleteOutcome::Declined;
        }

        let result = self
            .transport
            .send(requests::delete_book(id))
            .await
            .and_then(ApiResponse::error_for_status);

        match result {
            Ok(response) => {
                tracing::info!(book_id = %id, status = response.status, "book deleted");
                self.page.navigator.reload().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!(book_id = %id, error = %err, "book deletion failed");
                self.page.dialogs.alert(&self.messages.delete_failed);
                DeleteOutcome::Failed(err)
            }
        }
    }
}

#[async_trait]
impl EventHandler for DeleteHandler {
    fn name(&self) -> &'static str {
        "books.delete"
    }

    async fn handle(&self, event: &Event) -> Handled {
        let outcome = match BookId::from_element(&event.element) {
            Some(id) => self.delete_book(&id).await,
            None => {
                tracing::warn!(selector = %event.target, "delete action carries no book id");
                DeleteOutcome::Invalid("missing book id".to_string())
            }
        };

        Handled::prevent_default(outcome.summary())
    }
}
