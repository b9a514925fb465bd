//! Shared application state

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::config::Config;
use crate::infrastructure::memory::{
    AttendanceLedger, BiometricSimulator, HeatmapBoard, LeaveStore, PollStore,
};

/// State handed to every handler
///
/// Cloning is cheap: the pool and every store are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub polls: PollStore,
    pub leave: LeaveStore,
    pub heatmap: HeatmapBoard,
    pub biometric: BiometricSimulator,
    pub attendance: AttendanceLedger,
}

impl AppState {
    /// Creates state with empty in-memory stores and the demo attendance ledger
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            polls: PollStore::new(),
            leave: LeaveStore::new(),
            heatmap: HeatmapBoard::new(),
            biometric: BiometricSimulator::new(),
            attendance: AttendanceLedger::seeded(),
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.config)
    }
}
