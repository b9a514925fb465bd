use axum::{extract::State, http::StatusCode, Json};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::library::{Book, BookActionRequest, BookDetails, BookLog};
use crate::domain::repositories::LibraryRepository;
use crate::infrastructure::repositories::PostgresLibraryRepository;

/// POST /api/library/books
pub async fn create_book(
    State(pool): State<PgPool>,
    Json(req): Json<BookDetails>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = Book::new(req)?;
    PostgresLibraryRepository::new(pool).create_book(&book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/library/books
pub async fn list_books(State(pool): State<PgPool>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(PostgresLibraryRepository::new(pool).list_books().await?))
}

/// Check a book out or return it
///
/// POST /api/library/logs
pub async fn record_action(
    State(pool): State<PgPool>,
    Json(req): Json<BookActionRequest>,
) -> Result<(StatusCode, Json<BookLog>), ApiError> {
    let log = PostgresLibraryRepository::new(pool)
        .record_action(req)
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/library/logs
pub async fn list_logs(State(pool): State<PgPool>) -> Result<Json<Vec<BookLog>>, ApiError> {
    Ok(Json(PostgresLibraryRepository::new(pool).list_logs().await?))
}
