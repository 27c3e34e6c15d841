use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::app::AppState;
use crate::auth::{authenticate, AdminSession, GateDecision};
use crate::error::ApiError;

/// Session gate for the protected routes.
///
/// Loads the administrator from the session and lets the request through
/// with an [`AuthenticatedAdmin`](crate::auth::AuthenticatedAdmin) in its
/// extensions, or answers with a redirect to `/login`. The session is only
/// read here, never modified.
pub async fn require_admin(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let stored = AdminSession::load(&session).await?;

    match authenticate(stored.as_ref(), Utc::now(), state.config.session_ttl()) {
        GateDecision::Allow(admin) => {
            request.extensions_mut().insert(admin);
            Ok(next.run(request).await)
        }
        GateDecision::RedirectToLogin => {
            tracing::debug!(
                path = %request.uri().path(),
                had_session = stored.is_some(),
                "unauthenticated request redirected to login"
            );
            Err(ApiError::AuthRequired)
        }
    }
}
