// Credentials: password hashing, session tokens and API keys

pub mod api_key;
pub mod jwt;
pub mod password;
