use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::AssetStatus;
use super::errors::{optional_text, DomainError, DomainResult};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw query-string parameters of a search request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub branch: Option<String>,
    pub location: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Columns a search may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    CreatedAt,
    UpdatedAt,
    Quantity,
}

impl SortField {
    /// Column name shared by the asset and inventory tables
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Quantity => "quantity",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(SortField::Name),
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortField::UpdatedAt),
            "quantity" => Ok(SortField::Quantity),
            other => Err(DomainError::validation(format!(
                "Cannot sort by '{}'; expected one of name, created_at, updated_at, quantity",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(DomainError::validation("Order must be ASC or DESC")),
        }
    }
}

/// A validated search across assets and inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub branch: Option<String>,
    pub location: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort: Option<SortField>,
    pub order: SortOrder,
}

impl SearchQuery {
    /// Validates raw parameters
    ///
    /// # Business Rules
    /// - `page` starts at 1
    /// - `limit` is between 1 and [`MAX_PAGE_SIZE`]
    /// - `sort_by` must name a whitelisted column
    pub fn from_params(params: SearchParams) -> DomainResult<Self> {
        let page = params.page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::validation("Page must be at least 1"));
        }

        let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "Limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let sort = optional_text(params.sort_by)
            .map(|s| s.parse::<SortField>())
            .transpose()?;
        let order = optional_text(params.order)
            .map(|o| o.parse::<SortOrder>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            category: optional_text(params.category),
            supplier: optional_text(params.supplier),
            branch: optional_text(params.branch),
            location: optional_text(params.location),
            page,
            limit,
            sort,
            order,
        })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// Name filters paired with the join alias they apply to
    pub fn name_filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("category", self.category.as_deref()),
            ("supplier", self.supplier.as_deref()),
            ("branch", self.branch.as_deref()),
            ("location", self.location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(alias, value)| value.map(|v| (alias, v)))
        .collect()
    }
}

/// Builds a case-insensitive substring pattern with LIKE wildcards escaped
///
/// # Example
/// ```
/// use managehub_api::domain::search::contains_pattern;
///
/// assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// One page of results plus the unpaginated match count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssetSearchRow {
    pub id: Uuid,
    pub name: String,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub quantity: Option<i32>,
    pub purchase_cost: Option<Decimal>,
    pub category_name: Option<String>,
    pub supplier_name: Option<String>,
    pub branch_name: Option<String>,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventorySearchRow {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub reorder_level: i32,
    pub category_name: Option<String>,
    pub supplier_name: Option<String>,
    pub branch_name: Option<String>,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub assets: Page<AssetSearchRow>,
    pub inventories: Page<InventorySearchRow>,
}
