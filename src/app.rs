use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sha2::{Digest, Sha512};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tower_sessions::{
    cookie::{Key, SameSite},
    MemoryStore, SessionManagerLayer,
};

use crate::config::{AppConfig, ConfigError};
use crate::handlers::{protected, public};
use crate::middleware;
use crate::upstream::{UpstreamClient, UpstreamError};

pub const SESSION_COOKIE_NAME: &str = "resq.sid";

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: UpstreamClient,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        let upstream = UpstreamClient::new(config.base_url()?, config.upstream_timeout())?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }
}

/// Signing key for the session cookie, stretched from the configured secret.
pub fn cookie_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// The whole console: public auth pages, gated pages, static assets.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(config.session.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_signed(cookie_key(&config.session.secret));

    let static_dir = &config.server.static_dir;

    Router::new()
        // Public
        .merge(auth_public_routes())
        // Protected (session gate)
        .merge(protected_routes(state.clone()))
        // Static assets
        .route_service(
            "/favicon.ico",
            ServeFile::new(static_dir.join("images").join("resq-logo.svg")),
        )
        .fallback_service(ServeDir::new(static_dir))
        // Global middleware
        .layer(sessions)
        .layer(middleware::no_cache())
        .layer(middleware::no_proxy_cache())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/", get(auth::root))
        .route("/login", get(auth::login_get))
        .route("/request-otp", post(auth::request_otp))
        .route("/verify", get(auth::verify_get))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/resend-otp", post(auth::resend_otp))
        .route("/forgot-password", get(auth::forgot_get).post(auth::forgot_post))
        .route("/logout", get(auth::logout))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(dashboard_routes())
        .merge(driver_routes())
        .merge(document_routes())
        .merge(trip_routes())
        .merge(user_routes())
        .merge(withdrawal_routes())
        .route_layer(axum::middleware::from_fn_with_state(state, middleware::require_admin))
}

fn dashboard_routes() -> Router<AppState> {
    use protected::{analytics, dashboard};

    Router::new()
        .route("/dashboard", get(dashboard::dashboard_get))
        .route("/analytics", get(analytics::analytics_get))
}

fn driver_routes() -> Router<AppState> {
    use protected::drivers;

    Router::new()
        .route("/drivers", get(drivers::drivers_list))
        .route("/drivers/:id", get(drivers::driver_show))
        .route("/drivers/:id/approve", post(drivers::driver_approve))
        .route("/drivers/:id/reject", post(drivers::driver_reject))
        .route("/drivers/:id/block", post(drivers::driver_block))
        .route("/drivers/:id/unblock", post(drivers::driver_unblock))
        .route("/drivers/:id/delete", post(drivers::driver_delete))
}

fn document_routes() -> Router<AppState> {
    use protected::documents;

    Router::new()
        .route("/document-approvals", get(documents::pending_list))
        // Parameter names must match the driver routes at the same position.
        .route("/drivers/:id/documents/:document_id/approve", post(documents::document_approve))
        .route("/drivers/:id/documents/:document_id/reject", post(documents::document_reject))
}

fn trip_routes() -> Router<AppState> {
    use protected::trips;

    Router::new().route("/trips", get(trips::trips_list))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/users", get(users::users_list))
        .route("/users/:id/delete", post(users::user_delete))
}

fn withdrawal_routes() -> Router<AppState> {
    use protected::withdrawals;

    Router::new()
        .route("/withdrawals", get(withdrawals::withdrawals_list))
        .route("/withdrawals/:id/approve", post(withdrawals::withdrawal_approve))
        .route("/withdrawals/:id/complete", post(withdrawals::withdrawal_complete))
        .route("/withdrawals/:id/reject", post(withdrawals::withdrawal_reject))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_key_is_stable_per_secret() {
        assert_eq!(cookie_key("a").master(), cookie_key("a").master());
        assert_ne!(cookie_key("a").master(), cookie_key("b").master());
    }

    #[test]
    fn state_rejects_bad_upstream_url() {
        let mut config = AppConfig::development();
        config.upstream.base_url = "ftp://nowhere".to_string();
        assert!(matches!(AppState::new(config), Err(StartupError::Config(_))));
    }
}
