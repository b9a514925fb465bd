use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::config::Config;
use crate::domain::dashboard::{resolve_threshold, DashboardMetrics};
use crate::domain::repositories::MetricsRepository;
use crate::infrastructure::repositories::PostgresMetricsRepository;

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub low_stock_threshold: Option<i32>,
}

/// Asset totals, status breakdown and low-stock figures
///
/// GET /api/dashboard/metrics
/// GET /api/external/dashboard
pub async fn metrics(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<DashboardMetrics>, ApiError> {
    let threshold = resolve_threshold(query.low_stock_threshold, config.low_stock_threshold)?;
    let metrics = PostgresMetricsRepository::new(pool)
        .asset_metrics(threshold)
        .await?;
    Ok(Json(metrics))
}
