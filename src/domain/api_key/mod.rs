// API key domain module
// Keys issued to external applications, their usage records and statistics

#![allow(clippy::module_inception)]

pub mod api_key;
pub mod usage;
pub mod value_objects;

pub use api_key::{ApiKey, ApiKeyChanges, ApiKeyRegistration, DEFAULT_DAILY_LIMIT};
pub use usage::{ApiKeyUsage, UsageEvent, UsageStats};
pub use value_objects::ApiKeyStatus;
