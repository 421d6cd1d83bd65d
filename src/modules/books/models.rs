use std::fmt;

use bookdesk_kernel::FormReader;
use serde::{Deserialize, Serialize};

/// Attribute of the clicked button or edit form that names the book.
pub const BOOK_ID_ATTRIBUTE: &str = "book_id";

/// Opaque key of a book resource on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Read the identifier from the element's `book_id` attribute.
    /// A missing or blank attribute yields `None`.
    pub fn from_element(element: &dyn FormReader) -> Option<Self> {
        element
            .attribute(BOOK_ID_ATTRIBUTE)
            .filter(|raw| !raw.trim().is_empty())
            .map(Self::new)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for BookId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<i64> for BookId {
    fn from(raw: i64) -> Self {
        Self(raw.to_string())
    }
}

impl From<u64> for BookId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

/// Body of the update request, values copied verbatim from the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    /// Title of the book
    pub title: Option<String>,
    /// Author of the book
    pub author: Option<String>,
    /// Genre, free text
    pub kind: Option<String>,
    /// Publication date exactly as typed
    pub publication_date: Option<String>,
}

impl UpdatePayload {
    /// Collect the four edit fields. Absent fields stay `None` and are sent as `null`.
    pub fn from_form(form: &dyn FormReader) -> Self {
        let read = |name: &str| form.field(name).map(str::to_string);
        Self {
            title: read("title"),
            author: read("author"),
            kind: read("kind"),
            publication_date: read("publication_date"),
        }
    }
}
