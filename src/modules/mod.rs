pub mod books;

use std::sync::Arc;

use bookdesk_http::Transport;
use bookdesk_kernel::{settings::Settings, EventRegistry, Page};

/// Register all project-specific handlers with the registry
pub fn register_all(
    registry: &mut EventRegistry,
    transport: Arc<dyn Transport>,
    page: Page,
    settings: &Settings,
) -> books::BooksHandlers {
    let handlers = books::BooksHandlers::new(transport, page, settings);
    handlers.register(registry);
    handlers
}
