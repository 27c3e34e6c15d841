// handlers/public/auth/forgot.rs - GET/POST /forgot-password

use axum::{extract::State, response::Html, Form};

use super::{expires_in, login::PHONE_REQUIRED, PhoneForm};
use crate::app::AppState;
use crate::error::ApiError;
use crate::upstream::endpoints;
use crate::views::{self, pages::{AuthForm, FormStatus}};

const RESET_OTP_SENT: &str = "OTP sent successfully for password reset.";
const RESET_UNAVAILABLE: &str = "Unable to reach the password reset service. Please try again.";

pub async fn forgot_get() -> Result<Html<String>, ApiError> {
    views::render("forgot.html", AuthForm::default())
}

/// POST /forgot-password - request a reset code; the outcome is shown in place
pub async fn forgot_post(
    State(state): State<AppState>,
    Form(form): Form<PhoneForm>,
) -> Result<Html<String>, ApiError> {
    let phone = form.phone();

    if phone.is_empty() {
        let view = AuthForm::new(phone, Some(FormStatus::error(PHONE_REQUIRED)));
        return views::render("forgot.html", view);
    }

    let status = match state.upstream.send(&endpoints::forgot_password(&phone)).await {
        Ok(payload) => {
            FormStatus::success(payload.message().unwrap_or(RESET_OTP_SENT), expires_in(&payload))
        }
        Err(e) => FormStatus::error(e.user_message(RESET_UNAVAILABLE)),
    };

    views::render("forgot.html", AuthForm::new(phone, Some(status)))
}
