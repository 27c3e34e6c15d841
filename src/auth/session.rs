use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::{Expiry, Session};

use crate::upstream::Payload;

/// Session key holding the administrator login.
pub const SESSION_ADMIN_KEY: &str = "resq:admin";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// What the console remembers about a signed-in administrator.
///
/// `user` is the identity blob returned by the upstream verify call and is
/// never interpreted beyond display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub user: Option<Value>,
    pub tokens: SessionTokens,
    pub issued_at: DateTime<Utc>,
}

impl AdminSession {
    /// Build from a successful `verify-otp` payload
    /// (`data.user`, `data.accessToken`, `data.refreshToken`).
    pub fn from_verification(payload: &Payload, issued_at: DateTime<Utc>) -> Self {
        let data = payload.data();
        Self {
            user: data.get("user").cloned(),
            tokens: SessionTokens {
                access_token: data.str("accessToken").map(str::to_string),
                refresh_token: data.str("refreshToken").map(str::to_string),
            },
            issued_at,
        }
    }

    pub fn has_user(&self) -> bool {
        matches!(&self.user, Some(v) if !v.is_null())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Both a user and an access token: the only shape worth storing.
    pub fn is_complete(&self) -> bool {
        self.has_user() && self.access_token().is_some()
    }

    pub fn expires_at(&self, ttl: chrono::Duration) -> DateTime<Utc> {
        self.issued_at + ttl
    }

    /// Store in the session, rotating the session id and pinning the cookie
    /// to an absolute expiry.
    pub async fn establish(
        &self,
        session: &Session,
        ttl: chrono::Duration,
    ) -> Result<(), tower_sessions::session::Error> {
        session.cycle_id().await?;
        session.insert(SESSION_ADMIN_KEY, self).await?;

        let expires = time::OffsetDateTime::from_unix_timestamp(self.expires_at(ttl).timestamp())
            .unwrap_or_else(|_| time::OffsetDateTime::now_utc());
        session.set_expiry(Some(Expiry::AtDateTime(expires)));

        Ok(())
    }

    pub async fn load(session: &Session) -> Result<Option<Self>, tower_sessions::session::Error> {
        session.get::<AdminSession>(SESSION_ADMIN_KEY).await
    }

    /// Drop everything in the session and remove it from the store.
    pub async fn destroy(session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.flush().await
    }
}
