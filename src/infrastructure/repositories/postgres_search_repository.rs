use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::repositories::{RepositoryResult, SearchRepository};
use crate::domain::search::{
    contains_pattern, AssetSearchRow, InventorySearchRow, Page, SearchQuery, SearchResults,
};

const ASSET_COLUMNS: &str = r#"
    SELECT e.id, e.name, e.serial_number, e.status, e.quantity, e.purchase_cost,
           category.name AS category_name, supplier.name AS supplier_name,
           branch.name AS branch_name, location.name AS location_name,
           e.created_at, e.updated_at
"#;

const INVENTORY_COLUMNS: &str = r#"
    SELECT e.id, e.name, e.sku, e.quantity, e.unit_price, e.reorder_level,
           category.name AS category_name, supplier.name AS supplier_name,
           branch.name AS branch_name, location.name AS location_name,
           e.created_at, e.updated_at
"#;

/// Joins shared by both searchable tables, aliased as the filter names
const JOINS: &str = r#"
    LEFT JOIN categories category ON category.id = e.category_id
    LEFT JOIN suppliers supplier ON supplier.id = e.supplier_id
    LEFT JOIN branches branch ON branch.id = e.branch_id
    LEFT JOIN locations location ON location.id = e.location_id
"#;

/// PostgreSQL implementation of SearchRepository
///
/// Filter values are always bound as parameters. The only interpolated SQL
/// fragments are the table name, the join aliases and the whitelisted sort
/// column, all of which are static.
pub struct PostgresSearchRepository {
    pool: PgPool,
}

impl PostgresSearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn filtered<'q>(select: &str, table: &str, query: &'q SearchQuery) -> QueryBuilder<'q, Postgres> {
    let mut builder = QueryBuilder::new(select);
    builder.push(format!(" FROM {} e {}", table, JOINS));

    for (index, (alias, value)) in query.name_filters().into_iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(format!("{}.name ILIKE ", alias));
        builder.push_bind(contains_pattern(value));
    }
    builder
}

fn paged<'q>(select: &str, table: &str, query: &'q SearchQuery) -> QueryBuilder<'q, Postgres> {
    let mut builder = filtered(select, table, query);
    match query.sort {
        Some(field) => builder.push(format!(
            " ORDER BY e.{} {}, e.id",
            field.column(),
            query.order.as_sql()
        )),
        None => builder.push(" ORDER BY e.created_at DESC, e.id"),
    };
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(query.limit));
    builder.push(" OFFSET ");
    builder.push_bind(query.offset());
    builder
}

#[async_trait]
impl SearchRepository for PostgresSearchRepository {
    async fn search(&self, query: &SearchQuery) -> RepositoryResult<SearchResults> {
        let mut asset_page = paged(ASSET_COLUMNS, "assets", query);
        let mut asset_count = filtered("SELECT COUNT(*)", "assets", query);
        let mut inventory_page = paged(INVENTORY_COLUMNS, "inventory_items", query);
        let mut inventory_count = filtered("SELECT COUNT(*)", "inventory_items", query);

        let (assets, (asset_total,), inventories, (inventory_total,)) = tokio::try_join!(
            asset_page
                .build_query_as::<AssetSearchRow>()
                .fetch_all(&self.pool),
            asset_count.build_query_as::<(i64,)>().fetch_one(&self.pool),
            inventory_page
                .build_query_as::<InventorySearchRow>()
                .fetch_all(&self.pool),
            inventory_count
                .build_query_as::<(i64,)>()
                .fetch_one(&self.pool),
        )?;

        tracing::debug!(
            asset_total,
            inventory_total,
            page = query.page,
            "Search completed"
        );

        Ok(SearchResults {
            assets: Page {
                data: assets,
                total: asset_total,
            },
            inventories: Page {
                data: inventories,
                total: inventory_total,
            },
        })
    }
}
