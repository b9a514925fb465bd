use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::library::{Book, BookActionRequest, BookLog};

/// Repository trait for the lending library
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Insert a book; a taken ISBN yields `RepositoryError::Conflict`
    async fn create_book(&self, book: &Book) -> RepositoryResult<()>;

    /// All books, by title
    async fn list_books(&self) -> RepositoryResult<Vec<Book>>;

    /// Check a book out or in, logging the action in the same transaction
    ///
    /// # Errors
    /// - `NotFound` if the book does not exist
    /// - `Domain(InvalidState)` if the action does not fit its availability
    async fn record_action(&self, request: BookActionRequest) -> RepositoryResult<BookLog>;

    /// All checkout and return entries, newest first
    async fn list_logs(&self) -> RepositoryResult<Vec<BookLog>>;
}
