use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::asset::{Asset, AssetChanges, AssetDetails, AssetDisposal, DisposalRequest};
use crate::domain::repositories::AssetRepository;
use crate::infrastructure::repositories::PostgresAssetRepository;

async fn find_asset(repo: &PostgresAssetRepository, id: Uuid) -> Result<Asset, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Asset not found"))
}

/// Register a new asset
///
/// POST /api/assets
pub async fn create_asset(
    State(pool): State<PgPool>,
    Json(req): Json<AssetDetails>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let asset = Asset::new(req)?;
    PostgresAssetRepository::new(pool).save(&asset).await?;
    tracing::debug!(asset_id = %asset.id(), "Asset created");

    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /api/assets
pub async fn list_assets(State(pool): State<PgPool>) -> Result<Json<Vec<Asset>>, ApiError> {
    Ok(Json(PostgresAssetRepository::new(pool).list().await?))
}

/// GET /api/assets/:id
pub async fn get_asset(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Asset>, ApiError> {
    let repo = PostgresAssetRepository::new(pool);
    Ok(Json(find_asset(&repo, id).await?))
}

/// Partial update; disposal is only reachable through the disposal flow
///
/// PUT /api/assets/:id
pub async fn update_asset(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<AssetChanges>,
) -> Result<Json<Asset>, ApiError> {
    let asset = PostgresAssetRepository::new(pool).update(id, changes).await?;
    Ok(Json(asset))
}

/// DELETE /api/assets/:id
pub async fn delete_asset(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PostgresAssetRepository::new(pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Dispose of an asset and record how
///
/// POST /api/asset-disposals
pub async fn create_disposal(
    State(pool): State<PgPool>,
    Json(req): Json<DisposalRequest>,
) -> Result<(StatusCode, Json<AssetDisposal>), ApiError> {
    let disposal = PostgresAssetRepository::new(pool).dispose(req).await?;
    Ok((StatusCode::CREATED, Json(disposal)))
}

/// GET /api/asset-disposals
pub async fn list_disposals(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<AssetDisposal>>, ApiError> {
    Ok(Json(PostgresAssetRepository::new(pool).list_disposals().await?))
}
