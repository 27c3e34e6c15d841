use reqwest::StatusCode;
use thiserror::Error;

use super::payload::Payload;

/// Failure of a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream responded with {status}")]
    Status { status: StatusCode, payload: Payload },

    #[error("upstream call timed out")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            UpstreamError::Status { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Message shown to the administrator: the upstream `message`, then its
    /// `error` field, then the route's own fallback. Transport details stay
    /// in the logs.
    pub fn user_message(&self, fallback: &str) -> String {
        self.payload()
            .and_then(|p| p.message().or_else(|| p.error()))
            .unwrap_or(fallback)
            .to_string()
    }
}
