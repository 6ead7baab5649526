use super::model::id::BookId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("book '{title}' by '{author}' is already in the catalog")]
    DuplicateRecord { title: String, author: String },

    #[error("book not found: {0}")]
    BookNotFound(BookId),

    #[error("invalid status '{0}': expected 'available' or 'checked_out'")]
    InvalidStatus(String),
}
