use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::lost_item::LostItem;
use crate::domain::maintenance::MaintenanceRequest;
use crate::domain::notification::Notification;

/// Repository trait for maintenance requests
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Save a request (insert or update)
    async fn save(&self, request: &MaintenanceRequest) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<MaintenanceRequest>>;

    /// All requests, newest first
    async fn list(&self) -> RepositoryResult<Vec<MaintenanceRequest>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Repository trait for member notifications
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> RepositoryResult<()>;

    /// Insert a batch of notifications in one transaction
    async fn create_many(&self, notifications: &[Notification]) -> RepositoryResult<()>;

    /// Notifications addressed to one member, newest first
    async fn for_recipient(&self, recipient_id: Uuid) -> RepositoryResult<Vec<Notification>>;

    /// Flag a notification as read and return it
    async fn mark_read(&self, id: Uuid) -> RepositoryResult<Notification>;
}

/// Repository trait for the lost-and-found register
#[async_trait]
pub trait LostItemRepository: Send + Sync {
    /// Save an item (insert or update)
    async fn save(&self, item: &LostItem) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<LostItem>>;

    /// All items, most recently found first
    async fn list(&self) -> RepositoryResult<Vec<LostItem>>;
}
