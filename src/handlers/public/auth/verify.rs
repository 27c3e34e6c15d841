// handlers/public/auth/verify.rs - GET /verify, POST /verify-otp, POST /resend-otp

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use url::form_urlencoded;

use super::{expires_in, trimmed, PhoneForm};
use crate::api::flash::{Flash, VERIFY_KIND_PARAM};
use crate::app::AppState;
use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::upstream::endpoints;
use crate::views::{self, pages::{AuthForm, FormStatus}};

const OTP_AND_PHONE_REQUIRED: &str = "Provide both phone number and OTP.";
const OTP_REJECTED: &str = "We could not verify the OTP. Please try again.";
const RESEND_PHONE_REQUIRED: &str = "Phone number is required";
const OTP_RESENT: &str = "OTP resent successfully to your phone number";
const OTP_RESEND_FAILED: &str = "Unable to resend OTP. Please try again.";

/// `/verify?phoneNumber=…&message=…&statusType=…[&expiresIn=…]`
pub fn verify_location(phone: &str, flash: &Flash, expires_in: Option<String>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !phone.is_empty() {
        query.append_pair("phoneNumber", phone);
    }
    flash.encode_into(&mut query, VERIFY_KIND_PARAM);
    if let Some(expires_in) = expires_in {
        query.append_pair("expiresIn", &expires_in);
    }
    format!("/verify?{}", query.finish())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuery {
    pub phone_number: Option<String>,
    pub message: Option<String>,
    pub status_type: Option<String>,
    pub expires_in: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyForm {
    pub phone_number: Option<String>,
    pub otp: Option<String>,
}

/// GET /verify - OTP entry form; the status line appears only with a message
pub async fn verify_get(Query(query): Query<VerifyQuery>) -> Result<Response, ApiError> {
    let flash = Flash::decode(query.message.as_deref(), query.status_type.as_deref());
    let status = flash.map(|flash| FormStatus {
        kind: flash.kind,
        message: flash.message,
        expires_in: query.expires_in.clone().filter(|e| !e.is_empty()),
    });

    let view = AuthForm::new(trimmed(&query.phone_number), status);
    Ok(views::render("verify.html", view)?.into_response())
}

/// POST /verify-otp - exchange phone + code for a session
pub async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<VerifyForm>,
) -> Result<Response, ApiError> {
    let phone = trimmed(&form.phone_number);
    let otp = trimmed(&form.otp);

    if phone.is_empty() || otp.is_empty() {
        let view = AuthForm::new(phone, Some(FormStatus::error(OTP_AND_PHONE_REQUIRED)));
        return Ok(views::render("verify.html", view)?.into_response());
    }

    match state.upstream.send(&endpoints::verify_otp(&phone, &otp)).await {
        Ok(payload) => {
            let admin = AdminSession::from_verification(&payload, Utc::now());
            if !admin.is_complete() {
                tracing::warn!(
                    has_user = admin.has_user(),
                    has_token = admin.access_token().is_some(),
                    "OTP accepted without a usable user and token"
                );
                let view = AuthForm::new(phone, Some(FormStatus::error(OTP_REJECTED)));
                return Ok(views::render("verify.html", view)?.into_response());
            }

            admin.establish(&session, state.config.session_ttl()).await?;
            tracing::info!("administrator signed in");
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => {
            let view = AuthForm::new(phone, Some(FormStatus::error(e.user_message(OTP_REJECTED))));
            Ok(views::render("verify.html", view)?.into_response())
        }
    }
}

/// POST /resend-otp - issue a fresh code without touching the session
///
/// Always answers with a redirect back to `/verify`, carrying either the
/// backend's confirmation or the error.
pub async fn resend_otp(State(state): State<AppState>, Form(form): Form<PhoneForm>) -> Redirect {
    let phone = form.phone();

    if phone.is_empty() {
        return Redirect::to(&verify_location("", &Flash::error(RESEND_PHONE_REQUIRED), None));
    }

    let location = match state.upstream.send(&endpoints::request_otp(&phone)).await {
        Ok(payload) => {
            let flash = Flash::success(payload.message().unwrap_or(OTP_RESENT));
            verify_location(&phone, &flash, expires_in(&payload))
        }
        Err(e) => verify_location(&phone, &Flash::error(e.user_message(OTP_RESEND_FAILED)), None),
    };

    Redirect::to(&location)
}
