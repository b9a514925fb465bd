use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::search::{SearchQuery, SearchResults};

/// Filtered, paginated lookup over assets and inventory
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> RepositoryResult<SearchResults>;
}
