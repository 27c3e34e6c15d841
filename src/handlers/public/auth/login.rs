// handlers/public/auth/login.rs - GET /, GET /login, POST /request-otp

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use tower_sessions::Session;

use super::{expires_in, verify::verify_location, PhoneForm};
use crate::api::Flash;
use crate::app::AppState;
use crate::auth::{AdminSession, LoginStage};
use crate::error::ApiError;
use crate::upstream::endpoints;
use crate::views::{self, pages::{AuthForm, FormStatus}};

pub const PHONE_REQUIRED: &str = "Please enter your phone number.";
const OTP_SENT: &str = "OTP sent successfully.";
const OTP_SEND_FAILED: &str = "Unable to send OTP. Please try again.";

async fn login_stage(state: &AppState, session: &Session) -> Result<LoginStage, ApiError> {
    let stored = AdminSession::load(session).await?;
    Ok(LoginStage::of(stored.as_ref(), Utc::now(), state.config.session_ttl()))
}

/// GET / - send the browser wherever its session says it belongs
pub async fn root(State(state): State<AppState>, session: Session) -> Result<Redirect, ApiError> {
    Ok(Redirect::to(login_stage(&state, &session).await?.home()))
}

/// GET /login - phone number form, skipped when already signed in
pub async fn login_get(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, ApiError> {
    if login_stage(&state, &session).await? == LoginStage::Authenticated {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    Ok(views::render("login.html", AuthForm::default())?.into_response())
}

/// POST /request-otp - ask the backend to text a one-time code
///
/// On success the browser moves to `/verify` with the phone number and the
/// backend's message; on failure the login form is shown again with the
/// number kept.
pub async fn request_otp(
    State(state): State<AppState>,
    Form(form): Form<PhoneForm>,
) -> Result<Response, ApiError> {
    let phone = form.phone();

    if phone.is_empty() {
        let view = AuthForm::new(phone, Some(FormStatus::error(PHONE_REQUIRED)));
        return Ok(views::render("login.html", view)?.into_response());
    }

    match state.upstream.send(&endpoints::request_otp(&phone)).await {
        Ok(payload) => {
            tracing::info!("OTP requested for administrator login");
            let flash = Flash::success(payload.message().unwrap_or(OTP_SENT));
            Ok(Redirect::to(&verify_location(&phone, &flash, expires_in(&payload))).into_response())
        }
        Err(e) => {
            let status = FormStatus::error(e.user_message(OTP_SEND_FAILED));
            let view = AuthForm::new(phone, Some(status));
            Ok(views::render("login.html", view)?.into_response())
        }
    }
}
