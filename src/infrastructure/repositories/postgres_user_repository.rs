use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::conflict_on_unique;
use crate::domain::errors::DomainError;
use crate::domain::repositories::{RepositoryResult, UserRepository};
use crate::domain::user::value_objects::Email;
use crate::domain::user::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: Email::new(row.email)?,
            password_hash: row.password_hash,
            full_name: row.full_name,
            is_active: row.is_active,
        })
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, full_name, is_active)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already registered"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_hash, full_name, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::try_from).transpose()?)
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_hash, full_name, is_active FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::try_from).transpose()?)
    }

    async fn update_last_login(&self, user_id: Uuid) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
