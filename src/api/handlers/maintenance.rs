use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::maintenance::{MaintenanceDetails, MaintenanceRequest, MaintenanceStatus};
use crate::domain::repositories::MaintenanceRepository;
use crate::infrastructure::repositories::PostgresMaintenanceRepository;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: MaintenanceStatus,
}

async fn find_request(
    repo: &PostgresMaintenanceRepository,
    id: Uuid,
) -> Result<MaintenanceRequest, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Maintenance request not found"))
}

/// POST /api/maintenance
pub async fn create_request(
    State(pool): State<PgPool>,
    Json(req): Json<MaintenanceDetails>,
) -> Result<(StatusCode, Json<MaintenanceRequest>), ApiError> {
    let request = MaintenanceRequest::new(req)?;
    PostgresMaintenanceRepository::new(pool).save(&request).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/maintenance
pub async fn list_requests(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<MaintenanceRequest>>, ApiError> {
    Ok(Json(PostgresMaintenanceRepository::new(pool).list().await?))
}

/// GET /api/maintenance/:id
pub async fn get_request(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceRequest>, ApiError> {
    let repo = PostgresMaintenanceRepository::new(pool);
    Ok(Json(find_request(&repo, id).await?))
}

/// Move a request along its workflow
///
/// PATCH /api/maintenance/:id/status
pub async fn update_status(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(change): Json<StatusChange>,
) -> Result<Json<MaintenanceRequest>, ApiError> {
    let repo = PostgresMaintenanceRepository::new(pool);
    let mut request = find_request(&repo, id).await?;
    request.transition_to(change.status)?;
    repo.save(&request).await?;
    tracing::info!(request_id = %id, status = %request.status, "Maintenance status changed");

    Ok(Json(request))
}

/// DELETE /api/maintenance/:id
pub async fn delete_request(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresMaintenanceRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
