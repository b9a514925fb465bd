// Request extractors and middleware

pub mod api_key;
pub mod auth;
pub mod client_ip;

pub use api_key::require_api_key;
pub use auth::JwtAuth;
pub use client_ip::client_ip;
