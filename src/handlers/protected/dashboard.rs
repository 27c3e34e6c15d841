// handlers/protected/dashboard.rs - GET /dashboard

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};

use crate::api::{Flash, FlashQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::services::DashboardService;
use crate::views;

const DASHBOARD_UNAVAILABLE: &str = "Unable to load dashboard right now.";

/// GET /dashboard - overview tiles, driver queues, bookings and cancellations
pub async fn dashboard_get(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    let load = DashboardService::new(&state.upstream).load(Some(admin.token())).await;

    let flash = if load.degraded {
        Some(Flash::error(DASHBOARD_UNAVAILABLE))
    } else {
        flash.flash()
    };

    views::render_page("dashboard.html", "Dashboard", "dashboard", &admin.user, flash, load.view)
}
