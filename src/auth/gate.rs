use chrono::{DateTime, Utc};
use serde_json::Value;

use super::session::AdminSession;

/// Identity of the administrator behind a request that passed the gate.
/// Inserted into request extensions for protected handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedAdmin {
    pub user: Value,
    pub access_token: String,
}

impl AuthenticatedAdmin {
    pub fn token(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Allow(AuthenticatedAdmin),
    RedirectToLogin,
}

/// Decide whether a request may reach a protected route.
///
/// Allows only when the session holds a non-null user, an access token, and
/// was issued less than `ttl` ago. Never touches the session itself.
pub fn authenticate(
    session: Option<&AdminSession>,
    now: DateTime<Utc>,
    ttl: chrono::Duration,
) -> GateDecision {
    let Some(session) = session else {
        return GateDecision::RedirectToLogin;
    };

    let user = session.user.as_ref().filter(|u| !u.is_null());
    let (Some(user), Some(token)) = (user, session.access_token()) else {
        return GateDecision::RedirectToLogin;
    };

    if now >= session.expires_at(ttl) {
        return GateDecision::RedirectToLogin;
    }

    GateDecision::Allow(AuthenticatedAdmin {
        user: user.clone(),
        access_token: token.to_string(),
    })
}

/// Where a visitor to the public entry points should be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    Anonymous,
    Authenticated,
}

impl LoginStage {
    /// Authenticated exactly when the gate would let the session through,
    /// so `/login` and `/dashboard` can never bounce a browser between them.
    pub fn of(session: Option<&AdminSession>, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        match authenticate(session, now, ttl) {
            GateDecision::Allow(_) => LoginStage::Authenticated,
            GateDecision::RedirectToLogin => LoginStage::Anonymous,
        }
    }

    pub fn home(self) -> &'static str {
        match self {
            LoginStage::Authenticated => "/dashboard",
            LoginStage::Anonymous => "/login",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionTokens;
    use serde_json::json;

    fn ttl() -> chrono::Duration {
        chrono::Duration::hours(4)
    }

    fn admin(user: Option<Value>, token: Option<&str>, issued_at: DateTime<Utc>) -> AdminSession {
        AdminSession {
            user,
            tokens: SessionTokens {
                access_token: token.map(str::to_string),
                refresh_token: None,
            },
            issued_at,
        }
    }

    #[test]
    fn allows_user_with_token() {
        let now = Utc::now();
        let session = admin(Some(json!({ "id": 1 })), Some("acc"), now);

        match authenticate(Some(&session), now, ttl()) {
            GateDecision::Allow(a) => {
                assert_eq!(a.access_token, "acc");
                assert_eq!(a.user, json!({ "id": 1 }));
            }
            other => panic!("expected allow, got {:?}", other),
        }
    }

    #[test]
    fn denies_when_anything_is_missing() {
        let now = Utc::now();
        let cases = [
            admin(None, Some("acc"), now),
            admin(Some(Value::Null), Some("acc"), now),
            admin(Some(json!({ "id": 1 })), None, now),
            admin(None, None, now),
        ];

        for session in &cases {
            assert_eq!(authenticate(Some(session), now, ttl()), GateDecision::RedirectToLogin);
        }
        assert_eq!(authenticate(None, now, ttl()), GateDecision::RedirectToLogin);
    }

    #[test]
    fn expiry_is_absolute_from_issue_time() {
        let issued = Utc::now() - chrono::Duration::hours(4);
        let session = admin(Some(json!({ "id": 1 })), Some("acc"), issued);

        assert_eq!(authenticate(Some(&session), Utc::now(), ttl()), GateDecision::RedirectToLogin);

        let just_before = issued + chrono::Duration::hours(4) - chrono::Duration::seconds(1);
        assert!(matches!(authenticate(Some(&session), just_before, ttl()), GateDecision::Allow(_)));
    }

    #[test]
    fn login_stage_agrees_with_the_gate() {
        let now = Utc::now();
        let stage = |session: &AdminSession| LoginStage::of(Some(session), now, ttl());

        assert_eq!(LoginStage::of(None, now, ttl()), LoginStage::Anonymous);
        assert_eq!(stage(&admin(None, Some("acc"), now)), LoginStage::Anonymous);
        assert_eq!(stage(&admin(Some(json!({ "_id": "a1" })), None, now)).home(), "/login");

        let five_hours_ago = now - chrono::Duration::hours(5);
        let expired = admin(Some(json!({ "_id": "a1" })), Some("acc"), five_hours_ago);
        assert_eq!(stage(&expired), LoginStage::Anonymous);

        let valid = admin(Some(json!({ "_id": "a1" })), Some("acc"), now);
        assert_eq!(stage(&valid).home(), "/dashboard");
    }
}
