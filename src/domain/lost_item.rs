use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{optional_text, require_text, DomainError, DomainResult};

#[derive(Debug, Clone, Deserialize)]
pub struct LostItemReport {
    pub name: String,
    pub description: Option<String>,
    pub location_found: Option<String>,
    pub found_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRequest {
    pub claimed_by: String,
}

/// An item handed in at the front desk
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LostItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location_found: Option<String>,
    pub found_at: DateTime<Utc>,
    pub claimed: bool,
    pub claimed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LostItem {
    pub fn new(report: LostItemReport) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: require_text(&report.name, "Item name")?,
            description: optional_text(report.description),
            location_found: optional_text(report.location_found),
            found_at: report.found_at.unwrap_or(now),
            claimed: false,
            claimed_by: None,
            created_at: now,
        })
    }

    pub fn claim(&mut self, request: ClaimRequest) -> DomainResult<()> {
        let claimant = require_text(&request.claimed_by, "Claimant")?;
        if self.claimed {
            return Err(DomainError::invalid_state("Item already claimed"));
        }
        self.claimed = true;
        self.claimed_by = Some(claimant);
        Ok(())
    }
}
