use thiserror::Error;

/// Business-rule violations raised by domain types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input failed a validation rule
    #[error("{0}")]
    Validation(String),

    /// The entity is not in a state that permits the operation
    #[error("{0}")]
    InvalidState(String),

    /// The caller lacks the shared secret or permission
    #[error("{0}")]
    Forbidden(String),

    /// A rate or usage quota has been exhausted
    #[error("{0}")]
    QuotaExceeded(String),

    /// An in-memory entity does not exist
    #[error("{0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Trims a required text field, failing when it ends up empty.
pub fn require_text(value: &str, field: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Normalises an optional text field: blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("  Lobby  ", "name").unwrap(), "Lobby");
    }

    #[test]
    fn require_text_rejects_blank() {
        let err = require_text("   ", "name").unwrap_err();
        assert_eq!(err, DomainError::Validation("name cannot be empty".into()));
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional_text(None), None);
    }
}
