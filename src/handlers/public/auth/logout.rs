// handlers/public/auth/logout.rs - GET /logout

use axum::response::Redirect;
use tower_sessions::Session;

use crate::auth::AdminSession;

/// Destroy the session and return to the login form. A store failure is
/// logged; the browser is sent to `/login` either way.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = AdminSession::destroy(&session).await {
        tracing::warn!("failed to destroy session on logout: {}", e);
    }
    Redirect::to("/login")
}
