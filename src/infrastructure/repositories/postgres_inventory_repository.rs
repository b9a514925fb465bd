use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{conflict_on_unique, delete_by_id};
use crate::domain::inventory::{InventoryItem, StockAdjustment, StockMovement};
use crate::domain::repositories::{InventoryRepository, RepositoryError, RepositoryResult};

const SELECT_ITEM: &str = r#"
    SELECT id, name, sku, quantity, unit_price, reorder_level,
           category_id, supplier_id, branch_id, location_id,
           created_at, updated_at
    FROM inventory_items
"#;

/// PostgreSQL implementation of InventoryRepository
pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn create(&self, item: &InventoryItem) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, name, sku, quantity, unit_price, reorder_level,
                category_id, supplier_id, branch_id, location_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.reorder_level)
        .bind(item.category_id)
        .bind(item.supplier_id)
        .bind(item.branch_id)
        .bind(item.location_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, &format!("SKU '{}' already exists", item.sku)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<InventoryItem>> {
        let item = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ITEM))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn list(&self) -> RepositoryResult<Vec<InventoryItem>> {
        let items = sqlx::query_as(&format!("{} ORDER BY name", SELECT_ITEM))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "inventory_items", "Inventory item", id).await
    }

    async fn adjust_stock(
        &self,
        id: Uuid,
        adjustment: StockAdjustment,
    ) -> RepositoryResult<InventoryItem> {
        let mut tx = self.pool.begin().await?;

        let mut item: InventoryItem =
            sqlx::query_as(&format!("{} WHERE id = $1 FOR UPDATE", SELECT_ITEM))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| RepositoryError::not_found("Inventory item", id))?;

        let Some(movement) = item.adjust_stock(adjustment)? else {
            return Ok(item);
        };

        sqlx::query("UPDATE inventory_items SET quantity = $2, updated_at = $3 WHERE id = $1")
            .bind(item.id)
            .bind(item.quantity)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO stock_movements (
                id, inventory_item_id, movement_type, quantity, reason, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(movement.id)
        .bind(movement.inventory_item_id)
        .bind(movement.movement_type)
        .bind(movement.quantity)
        .bind(&movement.reason)
        .bind(movement.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            item_id = %item.id,
            movement = ?movement.movement_type,
            quantity = movement.quantity,
            "Stock adjusted"
        );
        Ok(item)
    }

    async fn movements(&self, id: Uuid) -> RepositoryResult<Vec<StockMovement>> {
        let movements = sqlx::query_as(
            r#"
            SELECT id, inventory_item_id, movement_type, quantity, reason, created_at
            FROM stock_movements
            WHERE inventory_item_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }
}
