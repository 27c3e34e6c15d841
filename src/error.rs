// Console error types
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use minijinja::HtmlEscape;

/// Failure of a console request that cannot be shown in place.
///
/// Missing form input and upstream rejections never get here: handlers
/// re-render the form or redirect with a flash. What reaches `IntoResponse`
/// is either the login redirect or a generic error page.
#[derive(Debug)]
pub enum ApiError {
    // 303 See Other -> /login
    AuthRequired,

    // 500 Internal Server Error
    Session(String),
    Render(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::AuthRequired => 303,
            ApiError::Session(_) => 500,
            ApiError::Render(_) => 500,
        }
    }

    /// Client-safe message. Session and render failures never leak details.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::AuthRequired => "Please sign in to continue.",
            ApiError::Session(_) => "Your session could not be loaded. Please sign in again.",
            ApiError::Render(_) => "This page could not be displayed.",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::AuthRequired => "AUTH_REQUIRED",
            ApiError::Session(_) => "SESSION_ERROR",
            ApiError::Render(_) => "RENDER_ERROR",
        }
    }

    /// Minimal standalone page, built without the template engine so a
    /// broken template can still be reported.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <title>ResQ Admin</title>\
             <link rel=\"stylesheet\" href=\"/css/admin.css\"></head><body class=\"error-page\">\
             <main><h1>Something went wrong</h1><p class=\"alert alert-error\">{}</p>\
             <p><code>{}</code></p><p><a href=\"/dashboard\">Back to dashboard</a></p>\
             </main></body></html>",
            HtmlEscape(self.message()),
            self.error_code()
        )
    }
}

impl ApiError {
    pub fn session(message: impl Into<String>) -> Self {
        ApiError::Session(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        ApiError::Render(message.into())
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        tracing::error!("Session store error: {}", err);
        ApiError::session(err.to_string())
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(err: minijinja::Error) -> Self {
        tracing::error!("Template render error: {:#}", err);
        ApiError::render(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Session(detail) | ApiError::Render(detail) => {
                write!(f, "{}: {}", self.error_code(), detail)
            }
            ApiError::AuthRequired => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::AuthRequired = self {
            return Redirect::to("/login").into_response();
        }

        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Html(self.to_html())).into_response()
    }
}
