// handlers/protected/trips.rs - GET /trips

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{Flash, FlashQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::upstream::{endpoints, ListParams, ListQuery};
use crate::views;

const TRIPS_UNAVAILABLE: &str = "Failed to load trips.";

#[derive(Debug, Serialize)]
struct TripsView {
    trips: Vec<Value>,
    pagination: Value,
    status: String,
    search: String,
}

fn default_pagination() -> Value {
    json!({ "page": 1, "pages": 1, "total": 0 })
}

pub async fn trips_list(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(params): Query<ListParams>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    // Trips are not filtered by document status.
    let query = ListQuery {
        document_status: String::new(),
        ..params.to_query()
    };
    let request = endpoints::list_trips(&query).bearer(Some(admin.token()));

    let mut view = TripsView {
        trips: Vec::new(),
        pagination: default_pagination(),
        status: query.status.clone(),
        search: query.search.clone(),
    };

    let flash = match state.upstream.send(&request).await {
        Ok(payload) => {
            let data = payload.data();
            view.trips = data.list("trips").to_vec();
            view.pagination = data.section("pagination").to_value_or(default_pagination());
            flash.flash()
        }
        Err(e) => {
            tracing::error!("Error fetching trips: {}", e);
            Some(Flash::error(TRIPS_UNAVAILABLE))
        }
    };

    views::render_page("trips.html", "Trips", "trips", &admin.user, flash, view)
}
