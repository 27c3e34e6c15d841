// handlers/protected/users.rs - rider accounts: list and delete

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::HardDeleteParam;
use crate::api::{Flash, FlashQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::types::HardDelete;
use crate::upstream::{endpoints, ListParams, ListQuery};
use crate::views;

const USERS_UNAVAILABLE: &str = "Failed to load users.";
const DELETE_FAILED: &str = "Failed to delete user.";

#[derive(Debug, Serialize)]
struct UsersView {
    users: Vec<Value>,
    total_users: Value,
    pagination: Value,
    status: String,
    search: String,
}

fn default_pagination() -> Value {
    json!({ "currentPage": 1, "totalPages": 1, "totalUsers": 0 })
}

pub async fn users_list(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(params): Query<ListParams>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    let query = ListQuery {
        document_status: String::new(),
        ..params.to_query()
    };
    let request = endpoints::list_users(&query).bearer(Some(admin.token()));

    let mut view = UsersView {
        users: Vec::new(),
        total_users: json!(0),
        pagination: default_pagination(),
        status: query.status.clone(),
        search: query.search.clone(),
    };

    let flash = match state.upstream.send(&request).await {
        Ok(payload) => {
            let data = payload.data();
            let pagination = data.section("pagination");
            view.users = data.list("users").to_vec();
            view.total_users = pagination
                .first_truthy(&["totalUsers"])
                .or_else(|| data.first_truthy(&["total"]))
                .cloned()
                .unwrap_or(json!(0));
            view.pagination = pagination.to_value_or(default_pagination());
            flash.flash()
        }
        Err(e) => {
            tracing::error!("Error fetching users: {}", e);
            Some(Flash::error(USERS_UNAVAILABLE))
        }
    };

    views::render_page("users.html", "Users", "users", &admin.user, flash, view)
}

/// POST /users/:id/delete - soft delete, or permanent with `hardDelete=true`
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(user_id): Path<String>,
    Query(query): Query<HardDeleteParam>,
    form: Option<Form<HardDeleteParam>>,
) -> Redirect {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let hard_delete =
        HardDelete::resolve(query.hard_delete.as_deref(), form.hard_delete.as_deref());
    let request = endpoints::delete_user(&user_id, &hard_delete).bearer(Some(admin.token()));

    let flash = match state.upstream.send(&request).await {
        Ok(_) => {
            tracing::info!(user_id = %user_id, hard_delete = hard_delete.as_str(), "user deleted");
            Flash::success(format!("User {} successfully", hard_delete.wording()))
        }
        Err(e) => {
            tracing::error!(
                user_id = %user_id,
                hard_delete = hard_delete.as_str(),
                "Delete user failed: {}",
                e
            );
            Flash::error(e.user_message(DELETE_FAILED))
        }
    };

    flash.redirect("/users")
}
