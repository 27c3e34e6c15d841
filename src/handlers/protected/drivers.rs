// handlers/protected/drivers.rs - driver list, detail, status actions, delete

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::HardDeleteParam;
use crate::api::{Flash, FlashQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::types::{DriverAction, HardDelete};
use crate::upstream::{endpoints, ListParams};
use crate::views;

const DRIVERS_UNAVAILABLE: &str = "Failed to load drivers.";
const DRIVER_UNAVAILABLE: &str = "Failed to load driver details.";
const DELETE_FAILED: &str = "Failed to delete driver.";

#[derive(Debug, Serialize)]
struct DriversView {
    drivers: Vec<Value>,
    total_drivers: Value,
    pagination: Value,
    status: String,
    search: String,
    document_status: String,
}

#[derive(Debug, Serialize)]
struct DriverDetailView {
    driver: Option<Value>,
}

fn default_pagination() -> Value {
    json!({ "currentPage": 1, "totalPages": 1, "total": 0 })
}

/// GET /drivers - paged list with status, search and document filters
pub async fn drivers_list(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(params): Query<ListParams>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    let query = params.to_query();
    let request = endpoints::list_drivers(&query).bearer(Some(admin.token()));

    let mut view = DriversView {
        drivers: Vec::new(),
        total_drivers: json!(0),
        pagination: default_pagination(),
        status: query.status.clone(),
        search: query.search.clone(),
        document_status: query.document_status.clone(),
    };

    let flash = match state.upstream.send(&request).await {
        Ok(payload) => {
            let data = payload.data();
            view.drivers = data.list("drivers").to_vec();
            view.total_drivers =
                data.first_truthy(&["totalDrivers", "total"]).cloned().unwrap_or(json!(0));
            view.pagination = data.section("pagination").to_value_or(default_pagination());
            flash.flash()
        }
        Err(e) => {
            tracing::error!("Error fetching drivers: {}", e);
            Some(Flash::error(DRIVERS_UNAVAILABLE))
        }
    };

    views::render_page("drivers.html", "Drivers", "drivers", &admin.user, flash, view)
}

/// GET /drivers/:id - single driver with documents and vehicle
pub async fn driver_show(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(driver_id): Path<String>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    let request = endpoints::driver(&driver_id).bearer(Some(admin.token()));

    let (view, flash) = match state.upstream.send(&request).await {
        Ok(payload) => (
            DriverDetailView {
                driver: payload.data_value().cloned(),
            },
            flash.flash(),
        ),
        Err(e) => {
            tracing::error!(driver_id = %driver_id, "Error fetching driver details: {}", e);
            (DriverDetailView { driver: None }, Some(Flash::error(DRIVER_UNAVAILABLE)))
        }
    };

    views::render_page("driver_detail.html", "Driver details", "drivers", &admin.user, flash, view)
}

/// Optional `returnTo` field on the action forms. `dashboard` sends the
/// browser back to the approval queue instead of the driver page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionForm {
    pub return_to: Option<String>,
}

impl ActionForm {
    fn returns_to_dashboard(&self) -> bool {
        self.return_to.as_deref().map(str::trim) == Some("dashboard")
    }
}

async fn apply_action(
    state: &AppState,
    admin: &AuthenticatedAdmin,
    driver_id: &str,
    action: DriverAction,
    form: Option<Form<ActionForm>>,
) -> Redirect {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let request = endpoints::driver_action(driver_id, action).bearer(Some(admin.token()));
    let result = state.upstream.send(&request).await;

    if let Err(e) = &result {
        tracing::error!(
            driver_id = %driver_id,
            action = action.segment(),
            "Driver action failed: {}",
            e
        );
    } else {
        tracing::info!(driver_id = %driver_id, action = action.segment(), "driver updated");
    }

    if form.returns_to_dashboard() {
        let flash = match result {
            Ok(_) => Flash::success(format!("Driver {}", action.past_tense())),
            Err(e) => {
                let fallback = format!("Unable to {} driver.", action.segment());
                Flash::error(e.user_message(&fallback))
            }
        };
        return flash.redirect("/dashboard");
    }

    let flash = match result {
        Ok(_) => Flash::success(format!("Driver {} successfully", action.past_tense())),
        Err(e) => Flash::error(e.user_message(&format!("Failed to {} driver.", action.segment()))),
    };
    flash.redirect(&format!("/drivers/{}", driver_id))
}

/// POST /drivers/:id/approve
pub async fn driver_approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(driver_id): Path<String>,
    form: Option<Form<ActionForm>>,
) -> Redirect {
    apply_action(&state, &admin, &driver_id, DriverAction::Approve, form).await
}

/// POST /drivers/:id/reject
pub async fn driver_reject(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(driver_id): Path<String>,
    form: Option<Form<ActionForm>>,
) -> Redirect {
    apply_action(&state, &admin, &driver_id, DriverAction::Reject, form).await
}

/// POST /drivers/:id/block
pub async fn driver_block(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(driver_id): Path<String>,
    form: Option<Form<ActionForm>>,
) -> Redirect {
    apply_action(&state, &admin, &driver_id, DriverAction::Block, form).await
}

/// POST /drivers/:id/unblock
pub async fn driver_unblock(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(driver_id): Path<String>,
    form: Option<Form<ActionForm>>,
) -> Redirect {
    apply_action(&state, &admin, &driver_id, DriverAction::Unblock, form).await
}

/// POST /drivers/:id/delete - soft delete, or permanent with `hardDelete=true`
pub async fn driver_delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(driver_id): Path<String>,
    Query(query): Query<HardDeleteParam>,
    form: Option<Form<HardDeleteParam>>,
) -> Redirect {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let hard_delete =
        HardDelete::resolve(query.hard_delete.as_deref(), form.hard_delete.as_deref());
    let request = endpoints::delete_driver(&driver_id, &hard_delete).bearer(Some(admin.token()));

    let flash = match state.upstream.send(&request).await {
        Ok(_) => {
            tracing::info!(
                driver_id = %driver_id,
                hard_delete = hard_delete.as_str(),
                "driver deleted"
            );
            Flash::success(format!("Driver {} successfully", hard_delete.wording()))
        }
        Err(e) => {
            tracing::error!(
                driver_id = %driver_id,
                hard_delete = hard_delete.as_str(),
                "Delete driver failed: {}",
                e
            );
            Flash::error(e.user_message(DELETE_FAILED))
        }
    };

    flash.redirect("/drivers")
}
