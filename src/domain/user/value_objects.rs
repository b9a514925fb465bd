use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{optional_text, DomainError, DomainResult};

/// Normalised e-mail address of a member or contact
///
/// # Invariants
/// - Surrounding whitespace is trimmed and the address lower-cased
/// - Contains exactly one '@' with text on both sides
/// - At least 3 characters long
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses and normalises an address
    ///
    /// # Example
    /// ```
    /// use managehub_api::domain::user::Email;
    ///
    /// let email = Email::new("  Desk@ManageHub.io ").expect("valid email");
    /// assert_eq!(email.as_str(), "desk@managehub.io");
    /// assert!(Email::new("front-desk").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> DomainResult<Self> {
        let email = email.as_ref().trim().to_lowercase();
        match email.split_once('@') {
            Some((local, domain))
                if email.len() >= 3
                    && !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@') =>
            {
                Ok(Email(email))
            }
            _ => Err(DomainError::validation(format!(
                "'{}' is not a valid e-mail address",
                email
            ))),
        }
    }

    /// Validates an optional contact address; blank counts as absent
    pub fn optional(email: Option<String>) -> DomainResult<Option<String>> {
        optional_text(email)
            .map(|email| Email::new(email).map(String::from))
            .transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
