use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::repositories::WorkLogRepository;
use crate::domain::work_log::{WorkLog, WorkLogChanges, WorkLogDetails};
use crate::infrastructure::repositories::PostgresWorkLogRepository;

async fn find_log(repo: &PostgresWorkLogRepository, id: Uuid) -> Result<WorkLog, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Work log not found"))
}

/// POST /api/work-logs
pub async fn create_log(
    State(pool): State<PgPool>,
    Json(req): Json<WorkLogDetails>,
) -> Result<(StatusCode, Json<WorkLog>), ApiError> {
    let log = WorkLog::new(req)?;
    PostgresWorkLogRepository::new(pool).save(&log).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/work-logs
pub async fn list_logs(State(pool): State<PgPool>) -> Result<Json<Vec<WorkLog>>, ApiError> {
    Ok(Json(PostgresWorkLogRepository::new(pool).list().await?))
}

/// GET /api/work-logs/:id
pub async fn get_log(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkLog>, ApiError> {
    let repo = PostgresWorkLogRepository::new(pool);
    Ok(Json(find_log(&repo, id).await?))
}

/// Partial update; omitted fields keep their values
///
/// PUT /api/work-logs/:id
pub async fn update_log(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<WorkLogChanges>,
) -> Result<Json<WorkLog>, ApiError> {
    let repo = PostgresWorkLogRepository::new(pool);
    let mut log = find_log(&repo, id).await?;
    log.apply(changes)?;
    repo.save(&log).await?;
    Ok(Json(log))
}

/// DELETE /api/work-logs/:id
pub async fn delete_log(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresWorkLogRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
