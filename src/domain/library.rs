use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{optional_text, require_text, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "book_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookAction {
    Checkout,
    Return,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookActionRequest {
    pub book_id: Uuid,
    pub user_name: String,
    pub action: BookAction,
}

/// A book in the hub's lending library
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Audit entry for a checkout or return
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BookLog {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_name: String,
    pub action: BookAction,
    pub timestamp: DateTime<Utc>,
}

impl Book {
    pub fn new(details: BookDetails) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: require_text(&details.title, "Title")?,
            author: require_text(&details.author, "Author")?,
            isbn: optional_text(details.isbn),
            available: true,
            created_at: Utc::now(),
        })
    }

    /// Applies a checkout or return and produces the log entry
    ///
    /// # Business Rules
    /// - Only an available book can be checked out
    /// - Only a checked-out book can be returned
    pub fn record(&mut self, user_name: &str, action: BookAction) -> DomainResult<BookLog> {
        let user_name = require_text(user_name, "User name")?;
        match (action, self.available) {
            (BookAction::Checkout, false) => {
                return Err(DomainError::invalid_state("Book is already checked out"))
            }
            (BookAction::Return, true) => {
                return Err(DomainError::invalid_state("Book is not checked out"))
            }
            (BookAction::Checkout, true) => self.available = false,
            (BookAction::Return, false) => self.available = true,
        }

        Ok(BookLog {
            id: Uuid::new_v4(),
            book_id: self.id,
            user_name,
            action,
            timestamp: Utc::now(),
        })
    }
}
