use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::biometric::{BiometricRecord, NewBiometricRecord};
use crate::infrastructure::memory::SimulationStatus;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub device_count: usize,
    pub records_per_device: usize,
}

#[derive(Debug, Deserialize)]
pub struct StartSimulationRequest {
    pub device_count: usize,
    pub interval_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub message: String,
    #[serde(flatten)]
    pub status: SimulationStatus,
}

/// POST /api/biometric/records
pub async fn create_record(
    State(state): State<AppState>,
    Json(req): Json<NewBiometricRecord>,
) -> Result<(StatusCode, Json<BiometricRecord>), ApiError> {
    let record = state.biometric.add(BiometricRecord::new(req)?).await;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/biometric/records
pub async fn list_records(State(state): State<AppState>) -> Json<Vec<BiometricRecord>> {
    Json(state.biometric.records().await)
}

/// One random reading
///
/// POST /api/biometric/dummy
pub async fn generate_dummy(
    State(state): State<AppState>,
) -> (StatusCode, Json<BiometricRecord>) {
    (StatusCode::CREATED, Json(state.biometric.generate_dummy().await))
}

/// `device_count × records_per_device` random readings
///
/// POST /api/biometric/bulk
pub async fn generate_bulk(
    State(state): State<AppState>,
    Json(req): Json<BulkRequest>,
) -> Result<(StatusCode, Json<Vec<BiometricRecord>>), ApiError> {
    let records = state
        .biometric
        .generate_bulk(req.device_count, req.records_per_device)
        .await?;
    Ok((StatusCode::CREATED, Json(records)))
}

/// Start (or restart) the background device simulation
///
/// POST /api/biometric/simulation/start
pub async fn start_simulation(
    State(state): State<AppState>,
    Json(req): Json<StartSimulationRequest>,
) -> Result<Json<SimulationResponse>, ApiError> {
    state
        .biometric
        .start(req.device_count, Duration::from_secs(req.interval_secs))
        .await?;

    Ok(Json(SimulationResponse {
        message: "Simulation started".to_string(),
        status: state.biometric.status().await,
    }))
}

/// POST /api/biometric/simulation/stop
pub async fn stop_simulation(State(state): State<AppState>) -> Json<SimulationResponse> {
    let message = if state.biometric.stop().await {
        "Simulation stopped"
    } else {
        "No simulation running"
    };

    Json(SimulationResponse {
        message: message.to_string(),
        status: state.biometric.status().await,
    })
}

/// GET /api/biometric/simulation
pub async fn simulation_status(State(state): State<AppState>) -> Json<SimulationStatus> {
    Json(state.biometric.status().await)
}
