use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{require_text, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    WorkspaceReservation,
    Subscription,
    ClockIn,
    Announcement,
    #[default]
    General,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationDetails {
    pub recipient_id: Uuid,
    pub message: String,
    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Announcement {
    pub recipient_ids: Vec<Uuid>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(details: NotificationDetails) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            recipient_id: details.recipient_id,
            message: require_text(&details.message, "Message")?,
            notification_type: details.notification_type,
            is_read: false,
            created_at: Utc::now(),
        })
    }
}

impl Announcement {
    /// Expands into one notification per distinct recipient
    pub fn into_notifications(self) -> DomainResult<Vec<Notification>> {
        let message = require_text(&self.message, "Message")?;
        let mut recipients = self.recipient_ids;
        recipients.sort();
        recipients.dedup();
        if recipients.is_empty() {
            return Err(DomainError::validation("At least one recipient is required"));
        }

        recipients
            .into_iter()
            .map(|recipient_id| {
                Notification::new(NotificationDetails {
                    recipient_id,
                    message: message.clone(),
                    notification_type: NotificationType::Announcement,
                })
            })
            .collect()
    }
}
