use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::inventory::{InventoryDetails, InventoryItem, StockAdjustment, StockMovement};
use crate::domain::repositories::InventoryRepository;
use crate::infrastructure::repositories::PostgresInventoryRepository;

/// POST /api/inventory
pub async fn create_item(
    State(pool): State<PgPool>,
    Json(req): Json<InventoryDetails>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let item = InventoryItem::new(req)?;
    PostgresInventoryRepository::new(pool).create(&item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/inventory
pub async fn list_items(State(pool): State<PgPool>) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(PostgresInventoryRepository::new(pool).list().await?))
}

/// GET /api/inventory/:id
pub async fn get_item(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryItem>, ApiError> {
    PostgresInventoryRepository::new(pool)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Inventory item not found"))
}

/// DELETE /api/inventory/:id
pub async fn delete_item(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresInventoryRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set an absolute stock level, recording the movement
///
/// PATCH /api/inventory/:id/stock
pub async fn adjust_stock(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(req): Json<StockAdjustment>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = PostgresInventoryRepository::new(pool)
        .adjust_stock(id, req)
        .await?;
    Ok(Json(item))
}

/// Stock movements for one item, newest first
///
/// GET /api/inventory/:id/movements
pub async fn list_movements(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StockMovement>>, ApiError> {
    let repo = PostgresInventoryRepository::new(pool);
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Inventory item not found"))?;

    Ok(Json(repo.movements(id).await?))
}
