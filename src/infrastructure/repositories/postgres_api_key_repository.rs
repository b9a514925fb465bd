use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::conflict_on_unique;
use crate::domain::api_key::{ApiKey, ApiKeyUsage, UsageEvent};
use crate::domain::repositories::{ApiKeyRepository, RepositoryResult};

const SELECT_KEY: &str = r#"
    SELECT id, app_name, key_prefix, key_hash, status, allowed_endpoints,
           daily_limit, current_day_usage, last_usage_date, total_usage,
           contact_email, description, expires_at, created_at, updated_at
    FROM api_keys
"#;

/// PostgreSQL implementation of ApiKeyRepository
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn create(&self, key: &ApiKey) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (
                id, app_name, key_prefix, key_hash, status, allowed_endpoints,
                daily_limit, contact_email, description, expires_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(key.id())
        .bind(key.app_name())
        .bind(key.key_prefix())
        .bind(key.key_hash())
        .bind(key.status())
        .bind(key.allowed_endpoints())
        .bind(key.daily_limit())
        .bind(key.contact_email())
        .bind(key.description())
        .bind(key.expires_at())
        .bind(key.created_at())
        .bind(key.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, &format!("App name '{}' already has a key", key.app_name()))
        })?;

        Ok(())
    }

    async fn save(&self, key: &ApiKey) -> RepositoryResult<()> {
        // Usage counters are owned by consume_quota and never written here
        sqlx::query(
            r#"
            UPDATE api_keys
            SET status = $2, allowed_endpoints = $3, daily_limit = $4,
                contact_email = $5, description = $6, expires_at = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(key.id())
        .bind(key.status())
        .bind(key.allowed_endpoints())
        .bind(key.daily_limit())
        .bind(key.contact_email())
        .bind(key.description())
        .bind(key.expires_at())
        .bind(key.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<ApiKey>> {
        let key = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_KEY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(key)
    }

    async fn list(&self) -> RepositoryResult<Vec<ApiKey>> {
        let keys = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_KEY))
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    async fn find_by_prefix(&self, prefix: &str) -> RepositoryResult<Vec<ApiKey>> {
        let keys = sqlx::query_as(&format!("{} WHERE key_prefix = $1", SELECT_KEY))
            .bind(prefix)
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    async fn consume_quota(&self, id: Uuid, today: NaiveDate) -> RepositoryResult<bool> {
        let consumed: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE api_keys
            SET current_day_usage = CASE
                    WHEN last_usage_date = $2 THEN current_day_usage + 1
                    ELSE 1
                END,
                last_usage_date = $2,
                total_usage = total_usage + 1
            WHERE id = $1
              AND (last_usage_date IS DISTINCT FROM $2 OR current_day_usage < daily_limit)
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(today)
        .fetch_optional(&self.pool)
        .await?;

        Ok(consumed.is_some())
    }

    async fn record_usage(&self, id: Uuid, event: &UsageEvent) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO api_key_usage (
                id, api_key_id, endpoint, method, status_code,
                user_agent, ip_address, response_time_ms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id)
        .bind(&event.endpoint)
        .bind(&event.method)
        .bind(i32::from(event.status_code))
        .bind(&event.user_agent)
        .bind(&event.ip_address)
        .bind(event.response_time_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn usage_since(
        &self,
        id: Uuid,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ApiKeyUsage>> {
        let usage = sqlx::query_as(
            r#"
            SELECT id, api_key_id, endpoint, method, status_code,
                   user_agent, ip_address, response_time_ms, created_at
            FROM api_key_usage
            WHERE api_key_id = $1 AND created_at >= $2
            ORDER BY created_at
            "#,
        )
        .bind(id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(usage)
    }
}
