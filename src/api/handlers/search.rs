use axum::{
    extract::{Query, State},
    Json,
};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::repositories::SearchRepository;
use crate::domain::search::{SearchParams, SearchQuery, SearchResults};
use crate::infrastructure::repositories::PostgresSearchRepository;

/// Filtered, paginated search over assets and inventory items
///
/// GET /api/search
/// GET /api/external/search
pub async fn search(
    State(pool): State<PgPool>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let query = SearchQuery::from_params(params)?;
    let results = PostgresSearchRepository::new(pool).search(&query).await?;
    Ok(Json(results))
}
