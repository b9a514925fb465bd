use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::delete_by_id;
use crate::domain::lost_item::LostItem;
use crate::domain::maintenance::MaintenanceRequest;
use crate::domain::notification::Notification;
use crate::domain::repositories::{
    LostItemRepository, MaintenanceRepository, NotificationRepository, RepositoryError,
    RepositoryResult,
};

// ===== Maintenance =====

const SELECT_MAINTENANCE: &str = r#"
    SELECT id, title, description, requested_by, asset_id, priority, status,
           created_at, updated_at
    FROM maintenance_requests
"#;

/// PostgreSQL implementation of MaintenanceRepository
pub struct PostgresMaintenanceRepository {
    pool: PgPool,
}

impl PostgresMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for PostgresMaintenanceRepository {
    async fn save(&self, request: &MaintenanceRequest) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_requests (
                id, title, description, requested_by, asset_id, priority, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                priority = EXCLUDED.priority,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(request.id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.requested_by)
        .bind(request.asset_id)
        .bind(request.priority)
        .bind(request.status)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<MaintenanceRequest>> {
        let request = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_MAINTENANCE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn list(&self) -> RepositoryResult<Vec<MaintenanceRequest>> {
        let requests = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_MAINTENANCE))
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "maintenance_requests", "Maintenance request", id).await
    }
}

// ===== Notifications =====

const INSERT_NOTIFICATION: &str = r#"
    INSERT INTO notifications (id, recipient_id, message, notification_type, is_read, created_at)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

/// PostgreSQL implementation of NotificationRepository
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, notification: &Notification) -> RepositoryResult<()> {
        sqlx::query(INSERT_NOTIFICATION)
            .bind(notification.id)
            .bind(notification.recipient_id)
            .bind(&notification.message)
            .bind(notification.notification_type)
            .bind(notification.is_read)
            .bind(notification.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn create_many(&self, notifications: &[Notification]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        for notification in notifications {
            sqlx::query(INSERT_NOTIFICATION)
                .bind(notification.id)
                .bind(notification.recipient_id)
                .bind(&notification.message)
                .bind(notification.notification_type)
                .bind(notification.is_read)
                .bind(notification.created_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn for_recipient(&self, recipient_id: Uuid) -> RepositoryResult<Vec<Notification>> {
        let notifications = sqlx::query_as(
            r#"
            SELECT id, recipient_id, message, notification_type, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid) -> RepositoryResult<Notification> {
        sqlx::query_as(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
            RETURNING id, recipient_id, message, notification_type, is_read, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Notification", id))
    }
}

// ===== Lost and found =====

const SELECT_LOST_ITEM: &str = r#"
    SELECT id, name, description, location_found, found_at, claimed, claimed_by, created_at
    FROM lost_items
"#;

/// PostgreSQL implementation of LostItemRepository
pub struct PostgresLostItemRepository {
    pool: PgPool,
}

impl PostgresLostItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LostItemRepository for PostgresLostItemRepository {
    async fn save(&self, item: &LostItem) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lost_items (
                id, name, description, location_found, found_at, claimed, claimed_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                claimed = EXCLUDED.claimed,
                claimed_by = EXCLUDED.claimed_by
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.location_found)
        .bind(item.found_at)
        .bind(item.claimed)
        .bind(&item.claimed_by)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<LostItem>> {
        let item = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_LOST_ITEM))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn list(&self) -> RepositoryResult<Vec<LostItem>> {
        let items = sqlx::query_as(&format!("{} ORDER BY found_at DESC", SELECT_LOST_ITEM))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }
}
