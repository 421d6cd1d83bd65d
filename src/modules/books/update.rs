use std::sync::Arc;

use async_trait::async_trait;
use bookdesk_http::{ApiResponse, RequestError, Transport};
use bookdesk_kernel::{
    settings::MessageSettings, Event, EventHandler, FormReader, Handled, Outcome, Page,
};

use super::models::{BookId, UpdatePayload};
use super::requests;
use crate::utils::InFlight;

/// What happened to an edit form submission.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// A save for the same book is still waiting for the backend.
    Busy,
    Updated,
    Failed(RequestError),
    /// The form could not be turned into a request.
    Invalid(String),
}

impl UpdateOutcome {
    pub fn summary(&self) -> Outcome {
        match self {
            UpdateOutcome::Busy => Outcome::Skipped,
            UpdateOutcome::Updated => Outcome::Completed,
            UpdateOutcome::Failed(err) => Outcome::Failed(err.to_string()),
            UpdateOutcome::Invalid(reason) => Outcome::Failed(reason.clone()),
        }
    }
}

/// Saves the edit form and goes back to the listing on success.
///
/// Failures only reach the console; the user stays on the form.
pub struct UpdateHandler {
    transport: Arc<dyn Transport>,
    page: Page,
    messages: MessageSettings,
    listing_path: String,
    in_flight: InFlight,
}

impl UpdateHandler {
    pub fn new(
        transport: Arc<dyn Transport>,
        page: Page,
        messages: MessageSettings,
        listing_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            page,
            messages,
            listing_path: listing_path.into(),
            in_flight: InFlight::new(),
        }
    }

    /// Read the submitted form and save it.
    pub async fn submit(&self, form: &dyn FormReader) -> UpdateOutcome {
        let Some(id) = BookId::from_element(form) else {
            self.page.console.error(&self.messages.update_failed);
            tracing::warn!("edit form carries no book id");
            return UpdateOutcome::Invalid("missing book id".to_string());
        };

        let payload = UpdatePayload::from_form(form);
        self.update_book(&id, &payload).await
    }

    pub async fn update_book(&self, id: &BookId, payload: &UpdatePayload) -> UpdateOutcome {
        if id.is_blank() {
            self.page.console.error(&self.messages.update_failed);
            tracing::warn!("update requested without a book id");
            return UpdateOutcome::Invalid("missing book id".to_string());
        }

        let Some(_guard) = self.in_flight.try_begin(id.as_str()) else {
            tracing::debug!(book_id = %id, "update already in flight, ignoring");
            return UpdateOutcome::Busy;
        };

        let request = match requests::update_book(id, payload) {
            Ok(request) => request,
            Err(err) => {
                self.page.console.error(&self.messages.update_failed);
                return UpdateOutcome::Invalid(err.to_string());
            }
        };

        let result = self
            .transport
            .send(request)
            .await
            .and_then(ApiResponse::error_for_status);

        match result {
            Ok(response) => {
                tracing::info!(book_id = %id, status = response.status, "book updated");
                self.page.navigator.assign(&self.listing_path).await;
                UpdateOutcome::Updated
            }
            Err(err) => {
                tracing::debug!(book_id = %id, error = %err, "book update failed");
                self.page.console.error(&self.messages.update_failed);
                UpdateOutcome::Failed(err)
            }
        }
    }
}

#[async_trait]
impl EventHandler for UpdateHandler {
    fn name(&self) -> &'static str {
        "books.update"
    }

    async fn handle(&self, event: &Event) -> Handled {
        let outcome = self.submit(&event.element).await;
        Handled::prevent_default(outcome.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::BOOK_ID_ATTRIBUTE;
    use crate::modules::books::testing::{FakePage, RecordingTransport};
    use bookdesk_http::{header::CONTENT_TYPE, Method};
    use bookdesk_kernel::{Element, Flow};
    use tokio::sync::Notify;

    const DUNE_JSON: &str =
        r#"{"title":"Dune","author":"Herbert","kind":"Novel","publication_date":"1965"}"#;

    fn handler(transport: Arc<RecordingTransport>, page: &FakePage) -> UpdateHandler {
        UpdateHandler::new(
            transport,
            page.page(),
            MessageSettings::default(),
            "/gestion_des_livres",
        )
    }

    fn dune_form() -> Element {
        Element::new()
            .with_attribute(BOOK_ID_ATTRIBUTE, "7")
            .with_field("title", "Dune")
            .with_field("author", "Herbert")
            .with_field("kind", "Novel")
            .with_field("publication_date", "1965")
    }

    #[tokio::test]
    async fn submit_puts_json_and_redirects() {
        let transport = Arc::new(RecordingTransport::answering(200));
        let page = FakePage::confirming(true);

        let outcome = handler(transport.clone(), &page).submit(&dune_form()).await;

        assert!(matches!(outcome, UpdateOutcome::Updated));
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::PUT);
        assert_eq!(sent[0].path(), "/update_book/7");
        assert_eq!(sent[0].headers[CONTENT_TYPE], "application/json");
        assert_eq!(sent[0].body.as_deref(), Some(DUNE_JSON));
        assert_eq!(page.assigned(), vec!["/gestion_des_livres"]);
        assert!(page.console_errors().is_empty());
    }

    #[tokio::test]
    async fn error_status_logs_and_stays() {
        let transport = Arc::new(RecordingTransport::answering(422));
        let page = FakePage::confirming(true);

        let outcome = handler(transport, &page).submit(&dune_form()).await;

        assert!(matches!(
            outcome,
            UpdateOutcome::Failed(RequestError::Status { status: 422 })
        ));
        assert!(page.assigned().is_empty());
        assert_eq!(page.console_errors(), vec!["Erreur lors de la mise à jour du livre"]);
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_is_logged_only() {
        let transport = Arc::new(RecordingTransport::unreachable());
        let page = FakePage::confirming(true);

        let outcome = handler(transport, &page).submit(&dune_form()).await;

        assert!(matches!(outcome, UpdateOutcome::Failed(RequestError::Connect(_))));
        assert!(page.assigned().is_empty());
        assert!(page.alerts().is_empty());
        assert_eq!(page.console_errors().len(), 1);
    }

    #[tokio::test]
    async fn form_without_book_id_sends_nothing() {
        let transport = Arc::new(RecordingTransport::new());
        let page = FakePage::confirming(true);
        let form = Element::new().with_field("title", "Dune");

        let outcome = handler(transport.clone(), &page).submit(&form).await;

        assert!(matches!(outcome, UpdateOutcome::Invalid(_)));
        assert!(transport.sent().is_empty());
        assert_eq!(page.console_errors().len(), 1);
    }

    #[tokio::test]
    async fn direct_update_with_blank_id_sends_nothing() {
        let transport = Arc::new(RecordingTransport::new());
        let page = FakePage::confirming(true);

        let outcome = handler(transport.clone(), &page)
            .update_book(&BookId::from(""), &UpdatePayload::default())
            .await;

        assert!(matches!(outcome, UpdateOutcome::Invalid(_)));
        assert!(transport.sent().is_empty());
        assert_eq!(page.console_errors(), vec!["Erreur lors de la mise à jour du livre"]);
    }

    #[tokio::test]
    async fn submit_event_prevents_default_even_on_failure() {
        for status in [200, 500] {
            let transport = Arc::new(RecordingTransport::answering(status));
            let page = FakePage::confirming(true);

            let handled = handler(transport, &page)
                .handle(&Event::submit("#updateBookForm", dune_form()))
                .await;

            assert_eq!(handled.flow, Flow::PreventDefault);
        }
    }

    #[tokio::test]
    async fn double_submit_sends_one_request() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(RecordingTransport::gated(gate.clone()));
        let page = FakePage::confirming(true);
        let handler = handler(transport.clone(), &page);
        let form = dune_form();

        let (first, second, _) = tokio::join!(
            handler.submit(&form),
            handler.submit(&form),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert!(matches!(first, UpdateOutcome::Updated));
        assert!(matches!(second, UpdateOutcome::Busy));
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(page.assigned().len(), 1);
    }
}
