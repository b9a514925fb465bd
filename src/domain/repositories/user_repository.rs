use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::user::value_objects::Email;
use crate::domain::user::User;

/// Repository trait for registered users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; a taken email yields `RepositoryError::Conflict`
    async fn create(&self, user: &User) -> RepositoryResult<()>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;

    /// Update user's last login timestamp
    async fn update_last_login(&self, user_id: Uuid) -> RepositoryResult<()>;
}
