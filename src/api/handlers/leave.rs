use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::authorize_admin;
use crate::api::errors::ApiError;
use crate::domain::leave::LeaveRequest;
use crate::infrastructure::memory::LeaveDecision;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FileLeaveRequest {
    pub staff_name: String,
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub admin_secret: String,
    pub admin: String,
}

/// File a leave request
///
/// POST /api/leave
pub async fn create_leave(
    State(state): State<AppState>,
    Json(req): Json<FileLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveRequest>), ApiError> {
    let request = LeaveRequest::new(&req.staff_name, &req.reason, req.start_date, req.end_date)?;
    let request = state.leave.insert(request).await;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/leave
pub async fn list_leave(State(state): State<AppState>) -> Json<Vec<LeaveRequest>> {
    Json(state.leave.list().await)
}

/// GET /api/leave/:id
pub async fn get_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveRequest>, ApiError> {
    Ok(Json(state.leave.get(id).await?))
}

/// POST /api/leave/:id/approve
pub async fn approve_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<LeaveRequest>, ApiError> {
    decide(state, id, req, LeaveDecision::Approve).await
}

/// POST /api/leave/:id/reject
pub async fn reject_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<LeaveRequest>, ApiError> {
    decide(state, id, req, LeaveDecision::Reject).await
}

async fn decide(
    state: AppState,
    id: Uuid,
    req: DecisionRequest,
    decision: LeaveDecision,
) -> Result<Json<LeaveRequest>, ApiError> {
    authorize_admin(&state.config, &req.admin_secret)?;

    let request = state.leave.decide(id, decision, &req.admin).await?;
    tracing::info!(
        leave_id = %id,
        status = ?request.status(),
        admin = request.decision_by().unwrap_or_default(),
        "Leave request decided"
    );
    Ok(Json(request))
}
