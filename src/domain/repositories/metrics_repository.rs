use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::dashboard::DashboardMetrics;

/// Read-only aggregates over the asset register
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Dashboard summary, counting assets with quantity at or below `low_stock_threshold`
    async fn asset_metrics(&self, low_stock_threshold: i32) -> RepositoryResult<DashboardMetrics>;
}
