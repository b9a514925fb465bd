use async_trait::async_trait;
use sqlx::PgPool;

use super::conflict_on_unique;
use crate::domain::library::{Book, BookActionRequest, BookLog};
use crate::domain::repositories::{LibraryRepository, RepositoryError, RepositoryResult};

const SELECT_BOOK: &str = "SELECT id, title, author, isbn, available, created_at FROM books";

/// PostgreSQL implementation of LibraryRepository
pub struct PostgresLibraryRepository {
    pool: PgPool,
}

impl PostgresLibraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryRepository for PostgresLibraryRepository {
    async fn create_book(&self, book: &Book) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, isbn, available, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.available)
        .bind(book.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "A book with this ISBN already exists"))?;

        Ok(())
    }

    async fn list_books(&self) -> RepositoryResult<Vec<Book>> {
        let books = sqlx::query_as(&format!("{} ORDER BY title", SELECT_BOOK))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn record_action(&self, request: BookActionRequest) -> RepositoryResult<BookLog> {
        let mut tx = self.pool.begin().await?;

        let mut book: Book = sqlx::query_as(&format!("{} WHERE id = $1 FOR UPDATE", SELECT_BOOK))
            .bind(request.book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Book", request.book_id))?;

        let log = book.record(&request.user_name, request.action)?;

        sqlx::query("UPDATE books SET available = $2 WHERE id = $1")
            .bind(book.id)
            .bind(book.available)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO book_logs (id, book_id, user_name, action, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(log.id)
        .bind(log.book_id)
        .bind(&log.user_name)
        .bind(log.action)
        .bind(log.timestamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(log)
    }

    async fn list_logs(&self) -> RepositoryResult<Vec<BookLog>> {
        let logs = sqlx::query_as(
            r#"
            SELECT id, book_id, user_name, action, timestamp
            FROM book_logs
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
