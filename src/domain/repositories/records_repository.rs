use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::job::Job;
use crate::domain::work_log::WorkLog;

/// Repository trait for the job board
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Job>>;

    /// All postings, newest first
    async fn list(&self) -> RepositoryResult<Vec<Job>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Repository trait for logged working hours
#[async_trait]
pub trait WorkLogRepository: Send + Sync {
    /// Save a log (insert or update)
    async fn save(&self, log: &WorkLog) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkLog>>;

    /// All logs, most recent work date first
    async fn list(&self) -> RepositoryResult<Vec<WorkLog>>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}
