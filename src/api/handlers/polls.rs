use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::authorize_admin;
use crate::api::errors::ApiError;
use crate::api::middleware::client_ip;
use crate::domain::poll::{Poll, VoteChoice};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub admin_secret: String,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote: VoteChoice,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub message: String,
    pub poll: Poll,
}

/// Open a new poll (admin only)
///
/// POST /api/polls
pub async fn create_poll(
    State(state): State<AppState>,
    Json(req): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<Poll>), ApiError> {
    authorize_admin(&state.config, &req.admin_secret)?;

    let created_by = req.created_by.as_deref().unwrap_or("admin");
    let poll = state.polls.insert(Poll::new(&req.question, created_by)?).await;
    tracing::info!(poll_id = %poll.id(), "Poll created");

    Ok((StatusCode::CREATED, Json(poll)))
}

/// GET /api/polls
pub async fn list_polls(State(state): State<AppState>) -> Json<Vec<Poll>> {
    Json(state.polls.list().await)
}

/// GET /api/polls/:id
pub async fn get_poll(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Poll>, ApiError> {
    Ok(Json(state.polls.get(id).await?))
}

/// Cast a vote; one per client address
///
/// POST /api/polls/:id/vote
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    let voter = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr))
        .ok_or_else(|| ApiError::bad_request("Could not determine client address"))?;

    let poll = state.polls.vote(id, &voter, req.vote).await?;

    Ok(Json(VoteResponse {
        message: "Vote recorded".to_string(),
        poll,
    }))
}
