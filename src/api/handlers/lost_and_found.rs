use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::lost_item::{ClaimRequest, LostItem, LostItemReport};
use crate::domain::repositories::LostItemRepository;
use crate::infrastructure::repositories::PostgresLostItemRepository;

async fn find_item(repo: &PostgresLostItemRepository, id: Uuid) -> Result<LostItem, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Lost item not found"))
}

/// POST /api/lost-and-found
pub async fn report_item(
    State(pool): State<PgPool>,
    Json(req): Json<LostItemReport>,
) -> Result<(StatusCode, Json<LostItem>), ApiError> {
    let item = LostItem::new(req)?;
    PostgresLostItemRepository::new(pool).save(&item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/lost-and-found
pub async fn list_items(State(pool): State<PgPool>) -> Result<Json<Vec<LostItem>>, ApiError> {
    Ok(Json(PostgresLostItemRepository::new(pool).list().await?))
}

/// GET /api/lost-and-found/:id
pub async fn get_item(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<LostItem>, ApiError> {
    let repo = PostgresLostItemRepository::new(pool);
    Ok(Json(find_item(&repo, id).await?))
}

/// POST /api/lost-and-found/:id/claim
pub async fn claim_item(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<LostItem>, ApiError> {
    let repo = PostgresLostItemRepository::new(pool);
    let mut item = find_item(&repo, id).await?;
    item.claim(req)?;
    repo.save(&item).await?;
    Ok(Json(item))
}
