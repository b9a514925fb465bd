use axum::{
    extract::{Path, State},
    Json,
};

use crate::domain::heatmap::HeatmapSlot;
use crate::state::AppState;

/// GET /api/heatmap
pub async fn all_slots(State(state): State<AppState>) -> Json<Vec<HeatmapSlot>> {
    Json(state.heatmap.all().await)
}

/// GET /api/heatmap/workspace/:id
pub async fn workspace_slots(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
) -> Json<Vec<HeatmapSlot>> {
    Json(state.heatmap.for_workspace(&workspace_id).await)
}

/// GET /api/heatmap/timeslot/:slot
pub async fn time_slot_usage(
    State(state): State<AppState>,
    Path(time_slot): Path<String>,
) -> Json<Vec<HeatmapSlot>> {
    Json(state.heatmap.for_time_slot(&time_slot).await)
}

/// Regenerate every slot with fresh usage figures
///
/// POST /api/heatmap/refresh
pub async fn refresh(State(state): State<AppState>) -> Json<Vec<HeatmapSlot>> {
    let slots = state.heatmap.refresh().await;
    tracing::debug!(slots = slots.len(), "Heatmap refreshed");
    Json(slots)
}
