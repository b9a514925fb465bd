use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{require_text, DomainError, DomainResult};

#[derive(Debug, Clone, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub requirements: String,
    pub application_link: String,
}

/// An opening advertised on the hub's job board
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub requirements: String,
    pub application_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(posting: JobPosting) -> DomainResult<Self> {
        let application_link = require_text(&posting.application_link, "Application link")?;
        if !is_http_link(&application_link) {
            return Err(DomainError::validation(
                "Application link must start with http:// or https://",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: require_text(&posting.title, "Title")?,
            company: require_text(&posting.company, "Company")?,
            requirements: posting.requirements.trim().to_string(),
            application_link,
            created_at: now,
            updated_at: now,
        })
    }
}

fn is_http_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.len() > scheme.len() && lower.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(link: &str) -> JobPosting {
        JobPosting {
            title: "Backend Engineer".into(),
            company: "Acme".into(),
            requirements: "Rust, PostgreSQL".into(),
            application_link: link.into(),
        }
    }

    #[test]
    fn accepts_http_links() {
        assert!(Job::new(posting("https://acme.dev/careers")).is_ok());
        assert!(Job::new(posting("http://acme.dev/apply")).is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(Job::new(posting("ftp://acme.dev")).is_err());
        assert!(Job::new(posting("acme.dev/careers")).is_err());
        assert!(Job::new(posting("https://")).is_err());
    }

    #[test]
    fn requires_company() {
        let mut posting = posting("https://acme.dev");
        posting.company = "".into();
        assert_eq!(
            Job::new(posting).unwrap_err(),
            DomainError::Validation("Company cannot be empty".into())
        );
    }
}
