use serde::Serialize;
use serde_json::Value;

use crate::api::{Flash, FlashKind};

/// Console chrome shared by every protected page: title, active nav entry,
/// signed-in administrator and the one-shot flash. Page-specific fields are
/// flattened alongside.
#[derive(Debug, Serialize)]
pub struct Page<'a, T: Serialize> {
    pub title: &'a str,
    pub active: &'a str,
    pub user: &'a Value,
    pub flash: Option<Flash>,
    #[serde(flatten)]
    pub view: T,
}

/// Status line on the login, verify and forgot-password forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormStatus {
    #[serde(rename = "type")]
    pub kind: FlashKind,
    pub message: String,
    pub expires_in: Option<String>,
}

impl FormStatus {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
            expires_in: None,
        }
    }

    pub fn success(message: impl Into<String>, expires_in: Option<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
            expires_in,
        }
    }
}

/// Context for the anonymous auth forms.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthForm {
    pub phone_number: String,
    pub status: Option<FormStatus>,
}

impl AuthForm {
    pub fn new(phone_number: impl Into<String>, status: Option<FormStatus>) -> Self {
        Self {
            phone_number: phone_number.into(),
            status,
        }
    }
}
