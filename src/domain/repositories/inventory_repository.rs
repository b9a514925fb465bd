use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::inventory::{InventoryItem, StockAdjustment, StockMovement};

/// Repository trait for stocked consumables
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Insert a new item; a taken SKU yields `RepositoryError::Conflict`
    async fn create(&self, item: &InventoryItem) -> RepositoryResult<()>;

    /// Find an item by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<InventoryItem>>;

    /// All items, by name
    async fn list(&self) -> RepositoryResult<Vec<InventoryItem>>;

    /// Delete an item by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Set the stock level, recording the movement in the same transaction
    async fn adjust_stock(
        &self,
        id: Uuid,
        adjustment: StockAdjustment,
    ) -> RepositoryResult<InventoryItem>;

    /// Movements of one item, newest first
    async fn movements(&self, id: Uuid) -> RepositoryResult<Vec<StockMovement>>;
}
