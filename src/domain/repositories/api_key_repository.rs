use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::api_key::{ApiKey, ApiKeyUsage, UsageEvent};

/// Repository trait for API keys and their usage log
///
/// Quota accounting happens in storage so that concurrent requests made with
/// the same key cannot overspend its daily limit.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Insert a newly issued key
    async fn create(&self, key: &ApiKey) -> RepositoryResult<()>;

    /// Persist status and settings of an existing key
    async fn save(&self, key: &ApiKey) -> RepositoryResult<()>;

    /// Find a key by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<ApiKey>>;

    /// All keys, newest first
    async fn list(&self) -> RepositoryResult<Vec<ApiKey>>;

    /// Keys sharing a plaintext prefix, the candidates for hash comparison
    async fn find_by_prefix(&self, prefix: &str) -> RepositoryResult<Vec<ApiKey>>;

    /// Count one request against today's quota
    ///
    /// Returns `false` without changing anything when the quota is spent.
    /// The day counter starts over when `today` differs from the last
    /// recorded usage date.
    async fn consume_quota(&self, id: Uuid, today: NaiveDate) -> RepositoryResult<bool>;

    /// Append a request to the usage log
    async fn record_usage(&self, id: Uuid, event: &UsageEvent) -> RepositoryResult<()>;

    /// Usage rows recorded at or after `since`
    async fn usage_since(
        &self,
        id: Uuid,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ApiKeyUsage>>;
}
