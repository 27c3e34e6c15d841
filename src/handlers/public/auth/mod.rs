// handlers/public/auth/mod.rs - Administrator login flow
//
// Anonymous → POST /request-otp → /verify → POST /verify-otp → Authenticated
//                                   ↑ POST /resend-otp
// GET /logout returns to Anonymous from anywhere.

pub mod forgot;
pub mod login;
pub mod logout;
pub mod verify;

pub use forgot::{forgot_get, forgot_post};
pub use login::{login_get, request_otp, root};
pub use logout::logout;
pub use verify::{resend_otp, verify_get, verify_otp};

use serde::Deserialize;
use serde_json::Value;

use crate::upstream::Payload;

/// `phoneNumber` as posted by the login, resend and forgot-password forms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneForm {
    pub phone_number: Option<String>,
}

impl PhoneForm {
    pub fn phone(&self) -> String {
        trimmed(&self.phone_number)
    }
}

pub(crate) fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}

/// OTP lifetime hint from `data.expiresIn`, when the backend sends one.
pub(crate) fn expires_in(payload: &Payload) -> Option<String> {
    match payload.data().get("expiresIn")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
