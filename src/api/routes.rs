use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    api_keys, assets, auth, badges, biometric, dashboard, heatmap, inventory, jobs, leave,
    library, lost_and_found, maintenance, notifications, organization, polls, search, work_logs,
};
use super::middleware::require_api_key;
use crate::state::AppState;

/// Builds the full application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(auth::health_check))
        .nest("/api", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // API keys
        .route(
            "/api-keys",
            post(api_keys::create_api_key).get(api_keys::list_api_keys),
        )
        .route(
            "/api-keys/:id",
            get(api_keys::get_api_key).put(api_keys::update_api_key),
        )
        .route("/api-keys/:id/revoke", delete(api_keys::revoke_api_key))
        .route("/api-keys/:id/usage", get(api_keys::api_key_usage))
        // Organization
        .route(
            "/companies",
            post(organization::create_company).get(organization::list_companies),
        )
        .route(
            "/companies/:id",
            get(organization::get_company)
                .put(organization::update_company)
                .delete(organization::delete_company),
        )
        .route(
            "/companies/:id/branches",
            post(organization::create_branch).get(organization::list_branches),
        )
        .route(
            "/departments",
            post(organization::create_department).get(organization::list_departments),
        )
        .route(
            "/departments/:id",
            get(organization::get_department)
                .put(organization::update_department)
                .delete(organization::delete_department),
        )
        .route(
            "/locations",
            post(organization::create_location).get(organization::list_locations),
        )
        .route("/locations/active", get(organization::list_active_locations))
        .route(
            "/locations/:id",
            get(organization::get_location)
                .put(organization::update_location)
                .delete(organization::delete_location),
        )
        .route(
            "/categories",
            post(organization::create_category).get(organization::list_categories),
        )
        .route(
            "/suppliers",
            post(organization::create_supplier).get(organization::list_suppliers),
        )
        // Assets
        .route("/assets", post(assets::create_asset).get(assets::list_assets))
        .route(
            "/assets/:id",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route(
            "/asset-disposals",
            post(assets::create_disposal).get(assets::list_disposals),
        )
        // Inventory
        .route(
            "/inventory",
            post(inventory::create_item).get(inventory::list_items),
        )
        .route(
            "/inventory/:id",
            get(inventory::get_item).delete(inventory::delete_item),
        )
        .route("/inventory/:id/stock", patch(inventory::adjust_stock))
        .route("/inventory/:id/movements", get(inventory::list_movements))
        // Reporting
        .route("/dashboard/metrics", get(dashboard::metrics))
        .route("/search", get(search::search))
        // Polls and leave
        .route("/polls", post(polls::create_poll).get(polls::list_polls))
        .route("/polls/:id", get(polls::get_poll))
        .route("/polls/:id/vote", post(polls::vote))
        .route("/leave", post(leave::create_leave).get(leave::list_leave))
        .route("/leave/:id", get(leave::get_leave))
        .route("/leave/:id/approve", post(leave::approve_leave))
        .route("/leave/:id/reject", post(leave::reject_leave))
        // Badges and heatmap
        .route("/badges", get(badges::list_badges))
        .route("/badges/user/:user_id", get(badges::user_badges))
        .route("/heatmap", get(heatmap::all_slots))
        .route("/heatmap/workspace/:id", get(heatmap::workspace_slots))
        .route("/heatmap/timeslot/:slot", get(heatmap::time_slot_usage))
        .route("/heatmap/refresh", post(heatmap::refresh))
        // Biometric sync simulation
        .route(
            "/biometric/records",
            post(biometric::create_record).get(biometric::list_records),
        )
        .route("/biometric/dummy", post(biometric::generate_dummy))
        .route("/biometric/bulk", post(biometric::generate_bulk))
        .route("/biometric/simulation", get(biometric::simulation_status))
        .route(
            "/biometric/simulation/start",
            post(biometric::start_simulation),
        )
        .route("/biometric/simulation/stop", post(biometric::stop_simulation))
        // Facilities
        .route(
            "/maintenance",
            post(maintenance::create_request).get(maintenance::list_requests),
        )
        .route(
            "/maintenance/:id",
            get(maintenance::get_request).delete(maintenance::delete_request),
        )
        .route("/maintenance/:id/status", patch(maintenance::update_status))
        .route("/notifications", post(notifications::create_notification))
        .route("/notifications/announcements", post(notifications::announce))
        .route("/notifications/me", get(notifications::my_notifications))
        .route(
            "/notifications/user/:id",
            get(notifications::user_notifications),
        )
        .route("/notifications/:id/read", patch(notifications::mark_read))
        .route(
            "/library/books",
            post(library::create_book).get(library::list_books),
        )
        .route(
            "/library/logs",
            post(library::record_action).get(library::list_logs),
        )
        .route(
            "/lost-and-found",
            post(lost_and_found::report_item).get(lost_and_found::list_items),
        )
        .route("/lost-and-found/:id", get(lost_and_found::get_item))
        .route("/lost-and-found/:id/claim", post(lost_and_found::claim_item))
        // Records
        .route("/jobs", post(jobs::create_job).get(jobs::list_jobs))
        .route("/jobs/:id", get(jobs::get_job).delete(jobs::delete_job))
        .route(
            "/work-logs",
            post(work_logs::create_log).get(work_logs::list_logs),
        )
        .route(
            "/work-logs/:id",
            get(work_logs::get_log)
                .put(work_logs::update_log)
                .delete(work_logs::delete_log),
        )
        .nest("/external", external_routes(state))
}

/// Routes for third-party applications, guarded by API key
fn external_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::metrics))
        .route("/search", get(search::search))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}
