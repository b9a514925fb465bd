use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::job::{Job, JobPosting};
use crate::domain::repositories::JobRepository;
use crate::infrastructure::repositories::PostgresJobRepository;

/// POST /api/jobs
pub async fn create_job(
    State(pool): State<PgPool>,
    Json(req): Json<JobPosting>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let job = Job::new(req)?;
    PostgresJobRepository::new(pool).create(&job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs
pub async fn list_jobs(State(pool): State<PgPool>) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(PostgresJobRepository::new(pool).list().await?))
}

/// GET /api/jobs/:id
pub async fn get_job(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, ApiError> {
    PostgresJobRepository::new(pool)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Job not found"))
}

/// DELETE /api/jobs/:id
pub async fn delete_job(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresJobRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
