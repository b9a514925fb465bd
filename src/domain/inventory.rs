use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{optional_text, require_text, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "stock_movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryDetails {
    pub name: String,
    pub sku: String,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub reorder_level: Option<i32>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
}

/// Request to set an item's stock to an absolute quantity
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustment {
    pub quantity: i32,
    pub reason: Option<String>,
}

/// A consumable stocked by the hub
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub reorder_level: i32,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recorded change in stock level
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StockMovement {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(details: InventoryDetails) -> DomainResult<Self> {
        let quantity = details.quantity.unwrap_or(0);
        let reorder_level = details.reorder_level.unwrap_or(0);
        if quantity < 0 || reorder_level < 0 {
            return Err(DomainError::validation(
                "Quantity and reorder level cannot be negative",
            ));
        }
        if details.unit_price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(DomainError::validation("Unit price cannot be negative"));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: require_text(&details.name, "Item name")?,
            sku: require_text(&details.sku, "SKU")?,
            quantity,
            unit_price: details.unit_price,
            reorder_level,
            category_id: details.category_id,
            supplier_id: details.supplier_id,
            branch_id: details.branch_id,
            location_id: details.location_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the stock level and describes the movement that produced it
    ///
    /// Returns `None` when the quantity is unchanged.
    pub fn adjust_stock(
        &mut self,
        adjustment: StockAdjustment,
    ) -> DomainResult<Option<StockMovement>> {
        if adjustment.quantity < 0 {
            return Err(DomainError::validation("Quantity cannot be negative"));
        }

        let difference = adjustment.quantity - self.quantity;
        if difference == 0 {
            return Ok(None);
        }

        let movement = StockMovement {
            id: Uuid::new_v4(),
            inventory_item_id: self.id,
            movement_type: if difference > 0 {
                MovementType::In
            } else {
                MovementType::Out
            },
            quantity: difference.abs(),
            reason: optional_text(adjustment.reason),
            created_at: Utc::now(),
        };

        self.quantity = adjustment.quantity;
        self.updated_at = movement.created_at;
        Ok(Some(movement))
    }

    pub fn needs_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32) -> InventoryItem {
        InventoryItem::new(InventoryDetails {
            name: "Printer paper".into(),
            sku: "PAP-A4".into(),
            quantity: Some(quantity),
            unit_price: None,
            reorder_level: Some(5),
            category_id: None,
            supplier_id: None,
            branch_id: None,
            location_id: None,
        })
        .unwrap()
    }

    #[test]
    fn restock_records_inbound_movement() {
        let mut item = item(10);
        let movement = item
            .adjust_stock(StockAdjustment {
                quantity: 25,
                reason: Some("delivery".into()),
            })
            .unwrap()
            .unwrap();

        assert_eq!(movement.movement_type, MovementType::In);
        assert_eq!(movement.quantity, 15);
        assert_eq!(item.quantity, 25);
    }

    #[test]
    fn usage_records_outbound_movement() {
        let mut item = item(10);
        let movement = item
            .adjust_stock(StockAdjustment {
                quantity: 4,
                reason: None,
            })
            .unwrap()
            .unwrap();

        assert_eq!(movement.movement_type, MovementType::Out);
        assert_eq!(movement.quantity, 6);
        assert!(item.needs_reorder());
    }

    #[test]
    fn unchanged_quantity_records_nothing() {
        let mut item = item(10);
        let movement = item
            .adjust_stock(StockAdjustment {
                quantity: 10,
                reason: None,
            })
            .unwrap();
        assert!(movement.is_none());
    }

    #[test]
    fn negative_target_fails() {
        let mut item = item(10);
        let result = item.adjust_stock(StockAdjustment {
            quantity: -1,
            reason: None,
        });
        assert!(result.is_err());
        assert_eq!(item.quantity, 10);
    }

    #[test]
    fn blank_sku_fails() {
        let result = InventoryItem::new(InventoryDetails {
            name: "Toner".into(),
            sku: " ".into(),
            quantity: None,
            unit_price: None,
            reorder_level: None,
            category_id: None,
            supplier_id: None,
            branch_id: None,
            location_id: None,
        });
        assert!(result.is_err());
    }
}
