pub mod auth;

use axum::http::{header, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub use auth::require_admin;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Pages carry per-session data; nothing may be cached by browsers or by
/// the hosting proxy in front of the console.
pub fn no_cache() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE))
}

pub fn no_proxy_cache() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-litespeed-cache-control"),
        HeaderValue::from_static("no-cache"),
    )
}
