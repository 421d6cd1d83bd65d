//! bookdesk application library
//!
//! Project-specific handlers for maintaining the book catalogue from a page:
//! deleting a book behind a confirmation dialog and saving the edit form.

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;
