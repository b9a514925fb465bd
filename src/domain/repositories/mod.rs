// Repository contracts (ports)
// Implemented by infrastructure adapters

pub mod api_key_repository;
pub mod asset_repository;
pub mod facility_repository;
pub mod inventory_repository;
pub mod library_repository;
pub mod metrics_repository;
pub mod organization_repository;
pub mod records_repository;
pub mod search_repository;
pub mod user_repository;

pub use api_key_repository::ApiKeyRepository;
pub use asset_repository::AssetRepository;
pub use facility_repository::{
    LostItemRepository, MaintenanceRepository, NotificationRepository,
};
pub use inventory_repository::InventoryRepository;
pub use library_repository::LibraryRepository;
pub use metrics_repository::MetricsRepository;
pub use organization_repository::{
    CompanyRepository, DepartmentRepository, LocationRepository, LookupRepository,
};
pub use records_repository::{JobRepository, WorkLogRepository};
pub use search_repository::SearchRepository;
pub use user_repository::UserRepository;

use thiserror::Error;

/// Errors surfaced by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    /// A foreign key names a row that does not exist
    #[error("{entity} not found")]
    MissingReference { entity: &'static str },

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error(transparent)]
    Domain(#[from] crate::domain::errors::DomainError),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
