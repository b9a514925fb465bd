use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::AssetStatus;
use crate::domain::errors::{optional_text, require_text, DomainError, DomainResult};

/// Descriptive fields supplied when registering an asset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetDetails {
    pub name: String,
    pub serial_number: Option<String>,
    pub quantity: Option<i32>,
    pub purchase_cost: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
}

/// Partial update of an asset; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetChanges {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub quantity: Option<i32>,
    pub purchase_cost: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
}

/// Asset aggregate root
///
/// A tracked piece of hub equipment or furniture.
///
/// # Invariants
/// - Name cannot be empty
/// - Quantity and purchase cost are never negative
/// - `Disposed` is only reached through [`Asset::dispose`], exactly once
///
/// # Example
/// ```
/// use managehub_api::domain::asset::{Asset, AssetDetails, AssetStatus};
///
/// let asset = Asset::new(AssetDetails {
///     name: "Standing desk".to_string(),
///     quantity: Some(4),
///     ..Default::default()
/// }).expect("valid asset");
///
/// assert_eq!(asset.status(), AssetStatus::Available);
/// ```
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Asset {
    id: Uuid,
    name: String,
    serial_number: Option<String>,
    status: AssetStatus,
    quantity: Option<i32>,
    purchase_cost: Option<Decimal>,
    category_id: Option<Uuid>,
    supplier_id: Option<Uuid>,
    branch_id: Option<Uuid>,
    location_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Asset {
    /// Registers a new asset in the `Available` status
    pub fn new(details: AssetDetails) -> DomainResult<Self> {
        let name = require_text(&details.name, "Asset name")?;
        validate_quantity(details.quantity)?;
        validate_cost(details.purchase_cost)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            serial_number: optional_text(details.serial_number),
            status: AssetStatus::Available,
            quantity: details.quantity,
            purchase_cost: details.purchase_cost,
            category_id: details.category_id,
            supplier_id: details.supplier_id,
            branch_id: details.branch_id,
            location_id: details.location_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update
    ///
    /// # Business Rules
    /// - A disposed asset cannot be edited
    /// - Status may not be set to `Disposed` here; use [`Asset::dispose`]
    pub fn apply(&mut self, changes: AssetChanges) -> DomainResult<()> {
        if self.status == AssetStatus::Disposed {
            return Err(DomainError::invalid_state("Disposed assets cannot be modified"));
        }

        if let Some(status) = changes.status {
            if status == AssetStatus::Disposed {
                return Err(DomainError::validation(
                    "Use the disposal endpoint to dispose of an asset",
                ));
            }
            if status != self.status && !self.status.can_transition_to(status) {
                return Err(DomainError::invalid_state(format!(
                    "Cannot move asset from {} to {}",
                    self.status, status
                )));
            }
            self.status = status;
        }

        if let Some(name) = changes.name {
            self.name = require_text(&name, "Asset name")?;
        }
        if changes.quantity.is_some() {
            validate_quantity(changes.quantity)?;
            self.quantity = changes.quantity;
        }
        if changes.purchase_cost.is_some() {
            validate_cost(changes.purchase_cost)?;
            self.purchase_cost = changes.purchase_cost;
        }
        if changes.serial_number.is_some() {
            self.serial_number = optional_text(changes.serial_number);
        }
        self.category_id = changes.category_id.or(self.category_id);
        self.supplier_id = changes.supplier_id.or(self.supplier_id);
        self.branch_id = changes.branch_id.or(self.branch_id);
        self.location_id = changes.location_id.or(self.location_id);
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Marks the asset as disposed
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidState)` - If the asset was already disposed
    pub fn dispose(&mut self) -> DomainResult<()> {
        if !self.status.can_transition_to(AssetStatus::Disposed) {
            return Err(DomainError::invalid_state("Asset already disposed"));
        }
        self.status = AssetStatus::Disposed;
        self.updated_at = Utc::now();
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn status(&self) -> AssetStatus {
        self.status
    }

    pub fn quantity(&self) -> Option<i32> {
        self.quantity
    }

    pub fn purchase_cost(&self) -> Option<Decimal> {
        self.purchase_cost
    }

    pub fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    pub fn supplier_id(&self) -> Option<Uuid> {
        self.supplier_id
    }

    pub fn branch_id(&self) -> Option<Uuid> {
        self.branch_id
    }

    pub fn location_id(&self) -> Option<Uuid> {
        self.location_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_quantity(quantity: Option<i32>) -> DomainResult<()> {
    match quantity {
        Some(q) if q < 0 => Err(DomainError::validation("Quantity cannot be negative")),
        _ => Ok(()),
    }
}

fn validate_cost(cost: Option<Decimal>) -> DomainResult<()> {
    match cost {
        Some(c) if c < Decimal::ZERO => {
            Err(DomainError::validation("Purchase cost cannot be negative"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> Asset {
        Asset::new(AssetDetails {
            name: "Standing desk".to_string(),
            quantity: Some(3),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn create_asset_starts_available() {
        let asset = desk();
        assert_eq!(asset.name(), "Standing desk");
        assert_eq!(asset.status(), AssetStatus::Available);
        assert_eq!(asset.quantity(), Some(3));
    }

    #[test]
    fn create_asset_with_blank_name_fails() {
        let result = Asset::new(AssetDetails {
            name: "  ".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn create_asset_with_negative_quantity_fails() {
        let result = Asset::new(AssetDetails {
            name: "Chair".to_string(),
            quantity: Some(-1),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn create_asset_with_negative_cost_fails() {
        let result = Asset::new(AssetDetails {
            name: "Chair".to_string(),
            purchase_cost: Some(Decimal::from(-5)),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn dispose_once() {
        let mut asset = desk();
        asset.dispose().unwrap();
        assert_eq!(asset.status(), AssetStatus::Disposed);

        let second = asset.dispose();
        assert_eq!(
            second,
            Err(DomainError::InvalidState("Asset already disposed".into()))
        );
    }

    #[test]
    fn update_cannot_dispose() {
        let mut asset = desk();
        let result = asset.apply(AssetChanges {
            status: Some(AssetStatus::Disposed),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(asset.status(), AssetStatus::Available);
    }

    #[test]
    fn update_disposed_asset_fails() {
        let mut asset = desk();
        asset.dispose().unwrap();
        let result = asset.apply(AssetChanges {
            name: Some("Renamed".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn update_changes_fields() {
        let mut asset = desk();
        let location = Uuid::new_v4();
        asset
            .apply(AssetChanges {
                name: Some("Desk".into()),
                status: Some(AssetStatus::Assigned),
                quantity: Some(1),
                location_id: Some(location),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(asset.name(), "Desk");
        assert_eq!(asset.status(), AssetStatus::Assigned);
        assert_eq!(asset.quantity(), Some(1));
        assert_eq!(asset.location_id(), Some(location));
    }
}
