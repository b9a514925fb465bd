use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::asset::AssetStatus;
use crate::domain::dashboard::{
    DashboardMetrics, LocationQuantity, StatusGroup, LOW_STOCK_LOCATION_LIMIT, UNASSIGNED_LOCATION,
};
use crate::domain::repositories::{MetricsRepository, RepositoryResult};

/// PostgreSQL implementation of MetricsRepository
///
/// Each aggregate is an independent query; they are issued concurrently and
/// each borrows its own pooled connection.
pub struct PostgresMetricsRepository {
    pool: PgPool,
}

impl PostgresMetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PostgresMetricsRepository {
    async fn asset_metrics(&self, low_stock_threshold: i32) -> RepositoryResult<DashboardMetrics> {
        let totals = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(quantity), 0)::BIGINT FROM assets",
        )
        .fetch_one(&self.pool);

        let disposed = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM assets WHERE status = $1",
        )
        .bind(AssetStatus::Disposed)
        .fetch_one(&self.pool);

        let status_groups = sqlx::query_as::<_, StatusGroup>(
            "SELECT status, COUNT(*) AS count FROM assets GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool);

        let low_stock = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM assets WHERE quantity IS NOT NULL AND quantity <= $1",
        )
        .bind(low_stock_threshold)
        .fetch_one(&self.pool);

        let low_stock_locations = sqlx::query_as::<_, LocationQuantity>(
            r#"
            SELECT COALESCE(l.name, $1) AS location,
                   COALESCE(SUM(a.quantity), 0)::BIGINT AS total_quantity
            FROM assets a
            LEFT JOIN locations l ON l.id = a.location_id
            GROUP BY COALESCE(l.name, $1)
            ORDER BY total_quantity ASC, location ASC
            LIMIT $2
            "#,
        )
        .bind(UNASSIGNED_LOCATION)
        .bind(LOW_STOCK_LOCATION_LIMIT)
        .fetch_all(&self.pool);

        let ((total_count, total_quantity), (disposed_count,), status_groups, (low_stock_count,), low_stock_locations) =
            tokio::try_join!(totals, disposed, status_groups, low_stock, low_stock_locations)?;

        Ok(DashboardMetrics {
            total_count,
            total_quantity,
            disposed_count,
            status_groups,
            low_stock_count,
            low_stock_locations,
            low_stock_threshold,
        })
    }
}
