use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::auth::api_key::{generate_api_key, hash_api_key, key_prefix};
use crate::domain::api_key::{ApiKey, ApiKeyChanges, ApiKeyRegistration, UsageStats};
use crate::domain::repositories::ApiKeyRepository;
use crate::infrastructure::repositories::PostgresApiKeyRepository;

const DEFAULT_USAGE_DAYS: i64 = 30;

/// Response from key creation; the only time the plaintext key is shown
#[derive(Debug, Serialize)]
pub struct CreatedApiKey {
    pub api_key: String,
    #[serde(flatten)]
    pub key: ApiKey,
}

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub days: Option<i64>,
}

async fn find_key(repo: &PostgresApiKeyRepository, id: Uuid) -> Result<ApiKey, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("API key not found"))
}

/// Register an application and issue its key
///
/// POST /api/api-keys
pub async fn create_api_key(
    State(pool): State<PgPool>,
    Json(req): Json<ApiKeyRegistration>,
) -> Result<(StatusCode, Json<CreatedApiKey>), ApiError> {
    let plaintext = generate_api_key();
    let prefix = key_prefix(&plaintext)
        .ok_or_else(|| ApiError::internal_server_error("Generated key is malformed"))?
        .to_string();
    let key_hash = {
        let plaintext = plaintext.clone();
        tokio::task::spawn_blocking(move || hash_api_key(&plaintext))
            .await
            .map_err(|e| ApiError::internal_server_error(format!("Hashing task failed: {}", e)))?
            .map_err(|e| ApiError::internal_server_error(format!("Failed to hash API key: {}", e)))?
    };

    let key = ApiKey::new(req, prefix, key_hash)?;
    PostgresApiKeyRepository::new(pool).create(&key).await?;
    tracing::info!(api_key_id = %key.id(), app_name = key.app_name(), "API key created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedApiKey {
            api_key: plaintext,
            key,
        }),
    ))
}

/// List keys, newest first
///
/// GET /api/api-keys
pub async fn list_api_keys(State(pool): State<PgPool>) -> Result<Json<Vec<ApiKey>>, ApiError> {
    let keys = PostgresApiKeyRepository::new(pool).list().await?;
    Ok(Json(keys))
}

/// GET /api/api-keys/:id
pub async fn get_api_key(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiKey>, ApiError> {
    let repo = PostgresApiKeyRepository::new(pool);
    Ok(Json(find_key(&repo, id).await?))
}

/// Update limits, endpoints, contact details or expiry
///
/// PUT /api/api-keys/:id
pub async fn update_api_key(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<ApiKeyChanges>,
) -> Result<Json<ApiKey>, ApiError> {
    let repo = PostgresApiKeyRepository::new(pool);
    let mut key = find_key(&repo, id).await?;
    key.apply(changes)?;
    repo.save(&key).await?;
    Ok(Json(key))
}

/// DELETE /api/api-keys/:id/revoke
pub async fn revoke_api_key(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PostgresApiKeyRepository::new(pool);
    let mut key = find_key(&repo, id).await?;
    key.revoke();
    repo.save(&key).await?;
    tracing::info!(api_key_id = %id, app_name = key.app_name(), "API key revoked");

    Ok(StatusCode::NO_CONTENT)
}

/// Usage statistics over the last `days` days (default 30)
///
/// GET /api/api-keys/:id/usage
pub async fn api_key_usage(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<UsageStats>, ApiError> {
    let days = query.days.unwrap_or(DEFAULT_USAGE_DAYS);
    if days < 1 {
        return Err(ApiError::bad_request("days must be at least 1"));
    }

    let repo = PostgresApiKeyRepository::new(pool);
    let key = find_key(&repo, id).await?;
    let now = Utc::now();
    let usage = repo.usage_since(id, now - Duration::days(days)).await?;

    Ok(Json(UsageStats::compute(&key, &usage, now.date_naive())))
}
