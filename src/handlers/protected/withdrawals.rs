// handlers/protected/withdrawals.rs - driver payout requests

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{Flash, FlashQuery};
use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::error::ApiError;
use crate::services::{WithdrawalService, WithdrawalsView};
use crate::types::WithdrawalAction;
use crate::upstream::ListParams;
use crate::views;

const WITHDRAWALS_UNAVAILABLE: &str = "Failed to load withdrawals.";
const REASON_REQUIRED: &str = "Rejection reason is required";
const WITHDRAWALS_PATH: &str = "/withdrawals";

#[derive(Debug, Serialize)]
struct WithdrawalsPage {
    #[serde(flatten)]
    list: WithdrawalsView,
    status: String,
    search: String,
}

/// GET /withdrawals - list and summary statistics, loaded together
pub async fn withdrawals_list(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Query(params): Query<ListParams>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, ApiError> {
    let query = params.to_query();
    let load = WithdrawalService::new(&state.upstream).load(&query, Some(admin.token())).await;

    let flash = if load.list_failed {
        Some(Flash::error(WITHDRAWALS_UNAVAILABLE))
    } else {
        flash.flash()
    };

    let page = WithdrawalsPage {
        list: load.view,
        status: query.status,
        search: query.search,
    };
    views::render_page("withdrawals.html", "Withdrawals", "withdrawals", &admin.user, flash, page)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteForm {
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectForm {
    pub rejection_reason: Option<String>,
}

async fn transition(
    state: &AppState,
    admin: &AuthenticatedAdmin,
    withdrawal_id: &str,
    action: WithdrawalAction,
    body: serde_json::Value,
) -> Redirect {
    let (success, fallback) = match action {
        WithdrawalAction::Approve => {
            ("Withdrawal approved successfully", "Failed to approve withdrawal.")
        }
        WithdrawalAction::Complete => {
            ("Withdrawal marked as completed", "Failed to complete withdrawal.")
        }
        WithdrawalAction::Reject => {
            ("Withdrawal rejected successfully", "Failed to reject withdrawal.")
        }
    };

    let result = WithdrawalService::new(&state.upstream)
        .apply(withdrawal_id, action, body, Some(admin.token()))
        .await;

    let flash = match result {
        Ok(()) => Flash::success(success),
        Err(e) => {
            tracing::error!(
                withdrawal_id = %withdrawal_id,
                action = action.segment(),
                "Withdrawal update failed: {}",
                e
            );
            Flash::error(e.user_message(fallback))
        }
    };

    flash.redirect(WITHDRAWALS_PATH)
}

/// POST /withdrawals/:id/approve
pub async fn withdrawal_approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(withdrawal_id): Path<String>,
) -> Redirect {
    transition(&state, &admin, &withdrawal_id, WithdrawalAction::Approve, json!({})).await
}

/// POST /withdrawals/:id/complete - optional `notes` are forwarded as-is
pub async fn withdrawal_complete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(withdrawal_id): Path<String>,
    form: Option<Form<CompleteForm>>,
) -> Redirect {
    let notes = form.and_then(|Form(f)| f.notes).unwrap_or_default();
    let body = json!({ "notes": notes });
    transition(&state, &admin, &withdrawal_id, WithdrawalAction::Complete, body).await
}

/// POST /withdrawals/:id/reject - requires a non-empty `rejectionReason`
pub async fn withdrawal_reject(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    Path(withdrawal_id): Path<String>,
    form: Option<Form<RejectForm>>,
) -> Redirect {
    let reason = form
        .and_then(|Form(f)| f.rejection_reason)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let Some(reason) = reason else {
        return Flash::error(REASON_REQUIRED).redirect(WITHDRAWALS_PATH);
    };

    transition(
        &state,
        &admin,
        &withdrawal_id,
        WithdrawalAction::Reject,
        json!({ "rejectionReason": reason }),
    )
    .await
}
