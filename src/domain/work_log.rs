use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{optional_text, require_text, DomainError, DomainResult};

const MAX_HOURS_PER_DAY: i64 = 24;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkLogDetails {
    pub user_id: Uuid,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub description: String,
    pub remote_location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkLogChanges {
    pub work_date: Option<NaiveDate>,
    pub hours_worked: Option<Decimal>,
    pub description: Option<String>,
    pub remote_location: Option<String>,
}

/// Hours a member logged against a day, on site or remote
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WorkLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub description: String,
    pub remote_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkLog {
    pub fn new(details: WorkLogDetails) -> DomainResult<Self> {
        validate_hours(details.hours_worked)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: details.user_id,
            work_date: details.work_date,
            hours_worked: details.hours_worked,
            description: require_text(&details.description, "Description")?,
            remote_location: optional_text(details.remote_location),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the fields present in `changes`, leaving the rest untouched
    pub fn apply(&mut self, changes: WorkLogChanges) -> DomainResult<()> {
        if let Some(hours) = changes.hours_worked {
            validate_hours(hours)?;
        }
        let description = changes
            .description
            .as_deref()
            .map(|d| require_text(d, "Description"))
            .transpose()?;

        if let Some(date) = changes.work_date {
            self.work_date = date;
        }
        if let Some(hours) = changes.hours_worked {
            self.hours_worked = hours;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if changes.remote_location.is_some() {
            self.remote_location = optional_text(changes.remote_location);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_hours(hours: Decimal) -> DomainResult<()> {
    if hours <= Decimal::ZERO || hours > Decimal::from(MAX_HOURS_PER_DAY) {
        return Err(DomainError::validation(
            "Hours worked must be greater than 0 and at most 24",
        ));
    }
    Ok(())
}
