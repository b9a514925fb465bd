pub mod value_objects;

pub use value_objects::Email;

use uuid::Uuid;

/// A registered hub member
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub password_hash: String,
    pub full_name: String,
    pub is_active: bool,
}
