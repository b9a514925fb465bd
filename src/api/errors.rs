use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::DomainError;
use crate::domain::repositories::RepositoryError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 403 Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 429 Too Many Requests error
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        }

        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) | DomainError::InvalidState(message) => {
                Self::bad_request(message)
            }
            DomainError::Forbidden(message) => Self::forbidden(message),
            DomainError::QuotaExceeded(message) => Self::too_many_requests(message),
            DomainError::NotFound(message) => Self::not_found(message),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, .. } => {
                Self::not_found(format!("{} not found", entity))
            }
            RepositoryError::Conflict(message) => Self::conflict(message),
            RepositoryError::MissingReference { entity } => {
                Self::not_found(format!("{} not found", entity))
            }
            RepositoryError::Domain(err) => err.into(),
            RepositoryError::Database(err) => {
                // Driver messages stay in the log
                tracing::error!(error = %err, "Database error");
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_state("done"), StatusCode::BAD_REQUEST),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::QuotaExceeded("spent".into()), StatusCode::TOO_MANY_REQUESTS),
            (DomainError::NotFound("gone".into()), StatusCode::NOT_FOUND),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn repository_errors_map_to_statuses() {
        let missing = ApiError::from(RepositoryError::not_found("Asset", "42"));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.message, "Asset not found");

        let conflict = ApiError::from(RepositoryError::Conflict("taken".into()));
        assert_eq!(conflict.status, StatusCode::CONFLICT);

        let dangling = ApiError::from(RepositoryError::MissingReference { entity: "Category" });
        assert_eq!(dangling.status, StatusCode::NOT_FOUND);
        assert_eq!(dangling.message, "Category not found");

        let db = ApiError::from(RepositoryError::Database(sqlx::Error::RowNotFound));
        assert_eq!(db.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.message, "Internal server error");
    }
}
