use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::JwtAuth;
use crate::domain::notification::{Announcement, Notification, NotificationDetails};
use crate::domain::repositories::NotificationRepository;
use crate::infrastructure::repositories::PostgresNotificationRepository;

/// POST /api/notifications
pub async fn create_notification(
    State(pool): State<PgPool>,
    Json(req): Json<NotificationDetails>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    let notification = Notification::new(req)?;
    PostgresNotificationRepository::new(pool)
        .create(&notification)
        .await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Send one message to many recipients
///
/// POST /api/notifications/announcements
pub async fn announce(
    State(pool): State<PgPool>,
    Json(req): Json<Announcement>,
) -> Result<(StatusCode, Json<Vec<Notification>>), ApiError> {
    let notifications = req.into_notifications()?;
    PostgresNotificationRepository::new(pool)
        .create_many(&notifications)
        .await?;
    tracing::info!(recipients = notifications.len(), "Announcement sent");

    Ok((StatusCode::CREATED, Json(notifications)))
}

/// GET /api/notifications/user/:id
pub async fn user_notifications(
    State(pool): State<PgPool>,
    Path(recipient_id): Path<Uuid>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = PostgresNotificationRepository::new(pool)
        .for_recipient(recipient_id)
        .await?;
    Ok(Json(notifications))
}

/// Notifications for the authenticated user
///
/// GET /api/notifications/me
pub async fn my_notifications(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = PostgresNotificationRepository::new(pool)
        .for_recipient(user_id)
        .await?;
    Ok(Json(notifications))
}

/// PATCH /api/notifications/:id/read
pub async fn mark_read(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, ApiError> {
    let notification = PostgresNotificationRepository::new(pool).mark_read(id).await?;
    Ok(Json(notification))
}
