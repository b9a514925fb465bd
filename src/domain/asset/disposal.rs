use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{optional_text, require_text, DomainResult};

/// Request to retire an asset from the register
#[derive(Debug, Clone, Deserialize)]
pub struct DisposalRequest {
    pub asset_id: Uuid,
    pub disposal_date: NaiveDate,
    pub method: String,
    pub reason: Option<String>,
    pub approved_by: Option<String>,
}

/// Record of an asset disposal
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssetDisposal {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub disposal_date: NaiveDate,
    pub method: String,
    pub reason: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssetDisposal {
    /// Validates a disposal request and builds the record
    pub fn new(request: DisposalRequest) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            asset_id: request.asset_id,
            disposal_date: request.disposal_date,
            method: require_text(&request.method, "Disposal method")?,
            reason: optional_text(request.reason),
            approved_by: optional_text(request.approved_by),
            created_at: Utc::now(),
        })
    }
}
