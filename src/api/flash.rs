//! One-shot feedback carried across a redirect in the query string.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }

    /// Anything other than `error` reads as success, which is also the
    /// default when the parameter is absent.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("error") => FlashKind::Error,
            _ => FlashKind::Success,
        }
    }
}

/// `{ type, message }` feedback shown once on the page after a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(rename = "type")]
    pub kind: FlashKind,
    pub message: String,
}

/// Name of the query parameter carrying the kind. Most pages use `type`,
/// the OTP verify page uses `statusType`.
pub const KIND_PARAM: &str = "type";
pub const VERIFY_KIND_PARAM: &str = "statusType";

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    /// Append `message` and the kind parameter to a query being built.
    pub fn encode_into<T: form_urlencoded::Target>(
        &self,
        query: &mut form_urlencoded::Serializer<'_, T>,
        kind_param: &str,
    ) {
        query.append_pair("message", &self.message);
        query.append_pair(kind_param, self.kind.as_str());
    }

    /// Read feedback back from already-decoded query parameters. Without a
    /// non-empty message there is nothing to show.
    pub fn decode(message: Option<&str>, kind: Option<&str>) -> Option<Self> {
        let message = message.map(str::trim).filter(|m| !m.is_empty())?;
        Some(Self {
            kind: FlashKind::parse(kind),
            message: message.to_string(),
        })
    }

    /// `path?message=…&type=…`
    pub fn location(&self, path: &str) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        self.encode_into(&mut query, KIND_PARAM);
        format!("{}?{}", path, query.finish())
    }

    pub fn redirect(&self, path: &str) -> Redirect {
        Redirect::to(&self.location(path))
    }
}

/// `?message=…&type=…` as read back on the page after the redirect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashQuery {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl FlashQuery {
    pub fn flash(&self) -> Option<Flash> {
        Flash::decode(self.message.as_deref(), self.kind.as_deref())
    }
}
