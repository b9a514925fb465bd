// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_api_key_repository;
pub mod postgres_asset_repository;
pub mod postgres_facility_repository;
pub mod postgres_inventory_repository;
pub mod postgres_library_repository;
pub mod postgres_metrics_repository;
pub mod postgres_organization_repository;
pub mod postgres_records_repository;
pub mod postgres_search_repository;
pub mod postgres_user_repository;

pub use postgres_api_key_repository::PostgresApiKeyRepository;
pub use postgres_asset_repository::PostgresAssetRepository;
pub use postgres_facility_repository::{
    PostgresLostItemRepository, PostgresMaintenanceRepository, PostgresNotificationRepository,
};
pub use postgres_inventory_repository::PostgresInventoryRepository;
pub use postgres_library_repository::PostgresLibraryRepository;
pub use postgres_metrics_repository::PostgresMetricsRepository;
pub use postgres_organization_repository::{
    PostgresCompanyRepository, PostgresDepartmentRepository, PostgresLocationRepository,
    PostgresLookupRepository,
};
pub use postgres_records_repository::{PostgresJobRepository, PostgresWorkLogRepository};
pub use postgres_search_repository::PostgresSearchRepository;
pub use postgres_user_repository::PostgresUserRepository;

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, RepositoryResult};

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::MissingReference {
                    entity: referenced_entity(db.constraint().unwrap_or_default()),
                }
            }
            _ => RepositoryError::Database(err),
        }
    }
}

/// Names the entity behind a `<table>_<column>_fkey` constraint
fn referenced_entity(constraint: &str) -> &'static str {
    const REFERENCES: &[(&str, &str)] = &[
        ("_inventory_item_id_fkey", "Inventory item"),
        ("_api_key_id_fkey", "API key"),
        ("_category_id_fkey", "Category"),
        ("_supplier_id_fkey", "Supplier"),
        ("_company_id_fkey", "Company"),
        ("_branch_id_fkey", "Branch"),
        ("_location_id_fkey", "Location"),
        ("_asset_id_fkey", "Asset"),
        ("_book_id_fkey", "Book"),
    ];

    REFERENCES
        .iter()
        .find(|&&(suffix, _)| constraint.ends_with(suffix))
        .map_or("Referenced record", |&(_, entity)| entity)
}

/// Maps a unique-constraint violation to `Conflict`, passing other errors through
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(message.to_string())
        }
        _ => err.into(),
    }
}

/// Deletes one row by primary key, failing with `NotFound` when nothing matched
///
/// `table` must be a trusted identifier; it is interpolated into the SQL.
pub(crate) async fn delete_by_id(
    pool: &PgPool,
    table: &'static str,
    entity: &'static str,
    id: Uuid,
) -> RepositoryResult<()> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::not_found(entity, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_constraints_name_their_entity() {
        assert_eq!(referenced_entity("assets_category_id_fkey"), "Category");
        assert_eq!(referenced_entity("maintenance_requests_asset_id_fkey"), "Asset");
        assert_eq!(
            referenced_entity("stock_movements_inventory_item_id_fkey"),
            "Inventory item"
        );
        assert_eq!(referenced_entity("departments_branch_id_fkey"), "Branch");
        assert_eq!(referenced_entity(""), "Referenced record");
    }
}
