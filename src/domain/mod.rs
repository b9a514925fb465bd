// Domain layer module exports
// Entities, state machines and repository ports; no HTTP or SQL here

pub mod api_key;
pub mod asset;
pub mod badge;
pub mod biometric;
pub mod dashboard;
pub mod errors;
pub mod heatmap;
pub mod inventory;
pub mod job;
pub mod leave;
pub mod library;
pub mod lost_item;
pub mod maintenance;
pub mod notification;
pub mod organization;
pub mod poll;
pub mod repositories;
pub mod search;
pub mod user;
pub mod work_log;
