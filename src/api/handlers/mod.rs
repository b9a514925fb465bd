// HTTP handlers, one module per resource
// Handlers translate between JSON and domain calls; no SQL here

pub mod api_keys;
pub mod assets;
pub mod auth;
pub mod badges;
pub mod biometric;
pub mod dashboard;
pub mod heatmap;
pub mod inventory;
pub mod jobs;
pub mod leave;
pub mod library;
pub mod lost_and_found;
pub mod maintenance;
pub mod notifications;
pub mod organization;
pub mod polls;
pub mod search;
pub mod work_logs;

use crate::api::errors::ApiError;
use crate::config::Config;

/// Checks the shared admin secret carried in a request body
pub(crate) fn authorize_admin(config: &Config, presented: &str) -> Result<(), ApiError> {
    if presented.is_empty() || presented != config.admin_secret {
        return Err(ApiError::forbidden("Invalid admin secret"));
    }
    Ok(())
}
