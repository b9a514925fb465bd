use axum::{
    extract::{Path, State},
    Json,
};

use crate::domain::badge::{catalog, earned_badges, Badge};
use crate::state::AppState;

/// Every badge that can be earned
///
/// GET /api/badges
pub async fn list_badges() -> Json<&'static [Badge]> {
    Json(catalog())
}

/// Badges earned from the user's attendance; unknown users earn none
///
/// GET /api/badges/user/:user_id
pub async fn user_badges(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Badge>> {
    Json(earned_badges(state.attendance.attendance(&user_id)))
}
