use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::asset::{Asset, AssetChanges, AssetDisposal, DisposalRequest};

/// Repository trait for the asset register
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Save an asset (insert or update)
    ///
    /// # Errors
    /// - `Domain(InvalidState)` if the stored asset has been disposed
    async fn save(&self, asset: &Asset) -> RepositoryResult<()>;

    /// Apply a partial update under a row lock
    ///
    /// # Errors
    /// - `NotFound` if the asset does not exist
    /// - `Domain(..)` if the changes are invalid or the asset was disposed
    async fn update(&self, id: Uuid, changes: AssetChanges) -> RepositoryResult<Asset>;

    /// Find an asset by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Asset>>;

    /// All assets, newest first
    async fn list(&self) -> RepositoryResult<Vec<Asset>>;

    /// Delete an asset by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Dispose of an asset and record the disposal atomically
    ///
    /// # Errors
    /// - `NotFound` if the asset does not exist
    /// - `Domain(InvalidState)` if it was already disposed
    async fn dispose(&self, request: DisposalRequest) -> RepositoryResult<AssetDisposal>;

    /// All disposals, newest first
    async fn list_disposals(&self) -> RepositoryResult<Vec<AssetDisposal>>;
}
