// handlers/protected/analytics.rs - GET /analytics

use axum::{extract::Query, response::Html, Extension};
use serde::Serialize;

use crate::api::FlashQuery;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::views;

#[derive(Serialize)]
struct AnalyticsView {}

pub async fn analytics_get(
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    views::render_page(
        "analytics.html",
        "Analytics",
        "analytics",
        &admin.user,
        flash.flash(),
        AnalyticsView {},
    )
}
