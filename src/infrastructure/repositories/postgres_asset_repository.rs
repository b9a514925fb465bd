use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::delete_by_id;
use crate::domain::asset::{Asset, AssetChanges, AssetDisposal, DisposalRequest};
use crate::domain::errors::DomainError;
use crate::domain::repositories::{AssetRepository, RepositoryError, RepositoryResult};

const SELECT_ASSET: &str = r#"
    SELECT id, name, serial_number, status, quantity, purchase_cost,
           category_id, supplier_id, branch_id, location_id,
           created_at, updated_at
    FROM assets
"#;

/// PostgreSQL implementation of AssetRepository
pub struct PostgresAssetRepository {
    pool: PgPool,
}

impl PostgresAssetRepository {
    /// Creates a new PostgresAssetRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn save(&self, asset: &Asset) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO assets (
                id, name, serial_number, status, quantity, purchase_cost,
                category_id, supplier_id, branch_id, location_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                serial_number = EXCLUDED.serial_number,
                status = EXCLUDED.status,
                quantity = EXCLUDED.quantity,
                purchase_cost = EXCLUDED.purchase_cost,
                category_id = EXCLUDED.category_id,
                supplier_id = EXCLUDED.supplier_id,
                branch_id = EXCLUDED.branch_id,
                location_id = EXCLUDED.location_id,
                updated_at = EXCLUDED.updated_at
            WHERE assets.status <> 'disposed'
            "#,
        )
        .bind(asset.id())
        .bind(asset.name())
        .bind(asset.serial_number())
        .bind(asset.status())
        .bind(asset.quantity())
        .bind(asset.purchase_cost())
        .bind(asset.category_id())
        .bind(asset.supplier_id())
        .bind(asset.branch_id())
        .bind(asset.location_id())
        .bind(asset.created_at())
        .bind(asset.updated_at())
        .execute(&self.pool)
        .await?;

        // A disposed row is left as is and reports no affected rows
        if result.rows_affected() == 0 {
            return Err(DomainError::invalid_state("Disposed assets cannot be modified").into());
        }
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: AssetChanges) -> RepositoryResult<Asset> {
        let mut tx = self.pool.begin().await?;

        let mut asset: Asset = sqlx::query_as(&format!("{} WHERE id = $1 FOR UPDATE", SELECT_ASSET))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Asset", id))?;

        asset.apply(changes)?;

        sqlx::query(
            r#"
            UPDATE assets SET
                name = $2, serial_number = $3, status = $4, quantity = $5,
                purchase_cost = $6, category_id = $7, supplier_id = $8,
                branch_id = $9, location_id = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(asset.id())
        .bind(asset.name())
        .bind(asset.serial_number())
        .bind(asset.status())
        .bind(asset.quantity())
        .bind(asset.purchase_cost())
        .bind(asset.category_id())
        .bind(asset.supplier_id())
        .bind(asset.branch_id())
        .bind(asset.location_id())
        .bind(asset.updated_at())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(asset)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Asset>> {
        let asset = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ASSET))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(asset)
    }

    async fn list(&self) -> RepositoryResult<Vec<Asset>> {
        let assets = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_ASSET))
            .fetch_all(&self.pool)
            .await?;
        Ok(assets)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "assets", "Asset", id).await
    }

    async fn dispose(&self, request: DisposalRequest) -> RepositoryResult<AssetDisposal> {
        let disposal = AssetDisposal::new(request)?;
        let mut tx = self.pool.begin().await?;

        // Row lock keeps two concurrent disposals from both passing the state check
        let mut asset: Asset = sqlx::query_as(&format!("{} WHERE id = $1 FOR UPDATE", SELECT_ASSET))
            .bind(disposal.asset_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Asset", disposal.asset_id))?;

        asset.dispose()?;

        sqlx::query("UPDATE assets SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(asset.id())
            .bind(asset.status())
            .bind(asset.updated_at())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO asset_disposals (
                id, asset_id, disposal_date, method, reason, approved_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(disposal.id)
        .bind(disposal.asset_id)
        .bind(disposal.disposal_date)
        .bind(&disposal.method)
        .bind(&disposal.reason)
        .bind(&disposal.approved_by)
        .bind(disposal.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(asset_id = %disposal.asset_id, method = %disposal.method, "Asset disposed");
        Ok(disposal)
    }

    async fn list_disposals(&self) -> RepositoryResult<Vec<AssetDisposal>> {
        let disposals = sqlx::query_as(
            r#"
            SELECT id, asset_id, disposal_date, method, reason, approved_by, created_at
            FROM asset_disposals
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(disposals)
    }
}
