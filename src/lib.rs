//! ManageHub API Library
//!
//! Back office for shared workspaces: organization structure, assets and
//! inventory, API keys for third-party access, and the day-to-day tools
//! (polls, leave, maintenance, notifications, library, lost and found,
//! jobs and work logs) exposed over a JSON HTTP API.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod state;
