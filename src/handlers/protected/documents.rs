// handlers/protected/documents.rs - pending document queue and per-document review

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{Flash, FlashQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::types::DocumentDecision;
use crate::upstream::{endpoints, ListQuery};
use crate::views;

const DOCUMENTS_UNAVAILABLE: &str = "Unable to load pending documents.";

#[derive(Debug, Serialize)]
struct DocumentApprovalsView {
    drivers: Vec<Value>,
    total_drivers: Value,
    /// Raw backend answer, shown in a collapsible block for support staff.
    pending_response: String,
    endpoint: String,
    error_message: Option<String>,
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_default()
}

/// GET /document-approvals - first page of drivers with pending documents
pub async fn pending_list(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    let query = ListQuery::default().with_status("pending");
    let request = endpoints::pending_documents(&query).bearer(Some(admin.token()));
    let endpoint = request
        .url(state.upstream.base_url())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| request.path());

    let view = match state.upstream.send(&request).await {
        Ok(payload) => {
            let data = payload.data();
            let drivers = data.list("drivers").to_vec();
            let total_drivers =
                data.get("totalDrivers").cloned().unwrap_or_else(|| json!(drivers.len()));
            DocumentApprovalsView {
                drivers,
                total_drivers,
                pending_response: pretty(payload.raw()),
                endpoint,
                error_message: None,
            }
        }
        Err(e) => {
            tracing::error!("Document approvals error: {}", e);
            DocumentApprovalsView {
                drivers: Vec::new(),
                total_drivers: json!(0),
                pending_response: e.payload().map(|p| pretty(p.raw())).unwrap_or_default(),
                endpoint,
                error_message: Some(e.user_message(DOCUMENTS_UNAVAILABLE)),
            }
        }
    };

    views::render_page(
        "document_approvals.html",
        "Document approvals",
        "documents",
        &admin.user,
        flash.flash(),
        view,
    )
}

async fn review(
    state: &AppState,
    admin: &AuthenticatedAdmin,
    driver_id: &str,
    document_id: &str,
    decision: DocumentDecision,
) -> Redirect {
    let (verb, past) = match decision {
        DocumentDecision::Approve => ("approve", "approved"),
        DocumentDecision::Reject => ("reject", "rejected"),
    };
    let request =
        endpoints::review_document(driver_id, document_id, decision).bearer(Some(admin.token()));

    let flash = match state.upstream.send(&request).await {
        Ok(_) => {
            tracing::info!(
                driver_id = %driver_id,
                document_id = %document_id,
                decision = verb,
                "document reviewed"
            );
            Flash::success(format!("Document {} successfully", past))
        }
        Err(e) => {
            tracing::error!(
                driver_id = %driver_id,
                document_id = %document_id,
                "Document {} error: {}",
                verb,
                e
            );
            Flash::error(e.user_message(&format!("Failed to {} document.", verb)))
        }
    };

    flash.redirect("/document-approvals")
}

/// POST /drivers/:id/documents/:document_id/approve
pub async fn document_approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path((driver_id, document_id)): Path<(String, String)>,
) -> Redirect {
    review(&state, &admin, &driver_id, &document_id, DocumentDecision::Approve).await
}

/// POST /drivers/:id/documents/:document_id/reject
pub async fn document_reject(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path((driver_id, document_id)): Path<(String, String)>,
) -> Redirect {
    review(&state, &admin, &driver_id, &document_id, DocumentDecision::Reject).await
}
