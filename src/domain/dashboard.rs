use serde::Serialize;

use super::asset::AssetStatus;
use super::errors::{DomainError, DomainResult};

/// Number of locations reported in [`DashboardMetrics::low_stock_locations`]
pub const LOW_STOCK_LOCATION_LIMIT: i64 = 5;

/// Label used for assets without a location
pub const UNASSIGNED_LOCATION: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StatusGroup {
    pub status: AssetStatus,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LocationQuantity {
    pub location: String,
    pub total_quantity: i64,
}

/// Asset register summary shown on the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub total_count: i64,
    pub total_quantity: i64,
    pub disposed_count: i64,
    pub status_groups: Vec<StatusGroup>,
    pub low_stock_count: i64,
    pub low_stock_locations: Vec<LocationQuantity>,
    pub low_stock_threshold: i32,
}

/// Resolves the low-stock threshold for a request
pub fn resolve_threshold(requested: Option<i32>, default: i32) -> DomainResult<i32> {
    let threshold = requested.unwrap_or(default);
    if threshold < 0 {
        return Err(DomainError::validation("Low stock threshold cannot be negative"));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_defaults() {
        assert_eq!(resolve_threshold(None, 5).unwrap(), 5);
        assert_eq!(resolve_threshold(Some(12), 5).unwrap(), 12);
        assert_eq!(resolve_threshold(Some(0), 5).unwrap(), 0);
    }

    #[test]
    fn negative_threshold_fails() {
        assert!(resolve_threshold(Some(-1), 5).is_err());
    }
}
