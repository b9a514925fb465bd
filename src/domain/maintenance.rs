use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{require_text, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "maintenance_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Progress of a maintenance request
///
/// # Status Transitions
/// ```text
/// Pending -> InProgress -> Completed
///    \           \
///     \-----------\--> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn can_transition_to(&self, next: MaintenanceStatus) -> bool {
        use MaintenanceStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (Pending, Cancelled) | (InProgress, Completed) | (InProgress, Cancelled)
        )
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceStatus::Pending => write!(f, "pending"),
            MaintenanceStatus::InProgress => write!(f, "in_progress"),
            MaintenanceStatus::Completed => write!(f, "completed"),
            MaintenanceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceDetails {
    pub title: String,
    pub description: String,
    pub requested_by: String,
    pub asset_id: Option<Uuid>,
    #[serde(default)]
    pub priority: MaintenancePriority,
}

/// A reported fault awaiting repair
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requested_by: String,
    pub asset_id: Option<Uuid>,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn new(details: MaintenanceDetails) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: require_text(&details.title, "Title")?,
            description: require_text(&details.description, "Description")?,
            requested_by: require_text(&details.requested_by, "Requester")?,
            asset_id: details.asset_id,
            priority: details.priority,
            status: MaintenanceStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn transition_to(&mut self, next: MaintenanceStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_state(format!(
                "Cannot move request from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MaintenanceRequest {
        MaintenanceRequest::new(MaintenanceDetails {
            title: "Broken AC".into(),
            description: "Meeting room 3 is too warm".into(),
            requested_by: "front desk".into(),
            asset_id: None,
            priority: MaintenancePriority::High,
        })
        .unwrap()
    }

    #[test]
    fn new_request_is_pending() {
        let request = request();
        assert_eq!(request.status, MaintenanceStatus::Pending);
        assert_eq!(request.priority, MaintenancePriority::High);
    }

    #[test]
    fn full_lifecycle() {
        let mut request = request();
        request.transition_to(MaintenanceStatus::InProgress).unwrap();
        request.transition_to(MaintenanceStatus::Completed).unwrap();
        assert_eq!(request.status, MaintenanceStatus::Completed);
    }

    #[test]
    fn cannot_skip_progress() {
        let mut request = request();
        let result = request.transition_to(MaintenanceStatus::Completed);
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(!MaintenanceStatus::Completed.can_transition_to(MaintenanceStatus::Cancelled));
        assert!(!MaintenanceStatus::Cancelled.can_transition_to(MaintenanceStatus::Pending));
    }

    #[test]
    fn priority_defaults_to_medium() {
        let details: MaintenanceDetails = serde_json::from_value(serde_json::json!({
            "title": "Leak",
            "description": "Kitchen sink",
            "requested_by": "ops"
        }))
        .unwrap();
        assert_eq!(details.priority, MaintenancePriority::Medium);
    }
}
