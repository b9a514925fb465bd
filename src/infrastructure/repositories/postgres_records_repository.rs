use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::delete_by_id;
use crate::domain::job::Job;
use crate::domain::repositories::{JobRepository, RepositoryResult, WorkLogRepository};
use crate::domain::work_log::WorkLog;

// ===== Jobs =====

const SELECT_JOB: &str = r#"
    SELECT id, title, company, requirements, application_link, created_at, updated_at
    FROM jobs
"#;

/// PostgreSQL implementation of JobRepository
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: &Job) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, title, company, requirements, application_link, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.requirements)
        .bind(&job.application_link)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Job>> {
        let job = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_JOB))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list(&self) -> RepositoryResult<Vec<Job>> {
        let jobs = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_JOB))
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "jobs", "Job", id).await
    }
}

// ===== Work logs =====

const SELECT_WORK_LOG: &str = r#"
    SELECT id, user_id, work_date, hours_worked, description, remote_location,
           created_at, updated_at
    FROM work_logs
"#;

/// PostgreSQL implementation of WorkLogRepository
pub struct PostgresWorkLogRepository {
    pool: PgPool,
}

impl PostgresWorkLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkLogRepository for PostgresWorkLogRepository {
    async fn save(&self, log: &WorkLog) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO work_logs (
                id, user_id, work_date, hours_worked, description, remote_location,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                work_date = EXCLUDED.work_date,
                hours_worked = EXCLUDED.hours_worked,
                description = EXCLUDED.description,
                remote_location = EXCLUDED.remote_location,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(log.id)
        .bind(log.user_id)
        .bind(log.work_date)
        .bind(log.hours_worked)
        .bind(&log.description)
        .bind(&log.remote_location)
        .bind(log.created_at)
        .bind(log.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkLog>> {
        let log = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_WORK_LOG))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    async fn list(&self) -> RepositoryResult<Vec<WorkLog>> {
        let logs = sqlx::query_as(&format!(
            "{} ORDER BY work_date DESC, created_at DESC",
            SELECT_WORK_LOG
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        delete_by_id(&self.pool, "work_logs", "Work log", id).await
    }
}
