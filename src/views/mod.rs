//! HTML rendering. Templates are compiled into the binary and rendered with
//! HTML autoescaping; handlers only hand over serializable view-models.

use axum::response::Html;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

use crate::api::format::{format_currency, format_number, format_percent};
use crate::api::Flash;
use crate::error::ApiError;

pub mod pages;

pub use pages::Page;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("auth_layout.html", include_str!("../../templates/auth_layout.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("verify.html", include_str!("../../templates/verify.html")),
    ("forgot.html", include_str!("../../templates/forgot.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("analytics.html", include_str!("../../templates/analytics.html")),
    ("drivers.html", include_str!("../../templates/drivers.html")),
    ("driver_detail.html", include_str!("../../templates/driver_detail.html")),
    ("document_approvals.html", include_str!("../../templates/document_approvals.html")),
    ("trips.html", include_str!("../../templates/trips.html")),
    ("users.html", include_str!("../../templates/users.html")),
    ("withdrawals.html", include_str!("../../templates/withdrawals.html")),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(build_environment);

fn build_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for &(name, source) in TEMPLATES {
        // A template that fails to parse is only missing from the
        // environment; its page then fails with a render error.
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = %name, "template failed to compile: {:#}", e);
        }
    }

    env.add_filter("number", |value: minijinja::Value| format_number(to_json(&value).as_ref()));
    env.add_filter("currency", |value: minijinja::Value| format_currency(to_json(&value).as_ref()));
    env.add_filter("percent", |value: minijinja::Value| format_percent(to_json(&value).as_ref()));
    env.add_filter("display_name", display_name_filter);

    env
}

fn to_json(value: &minijinja::Value) -> Option<Value> {
    if value.is_undefined() || value.is_none() {
        return None;
    }
    serde_json::to_value(value).ok()
}

/// Best human label for a person record: full name, first + last, phone, email.
fn display_name_filter(value: minijinja::Value) -> String {
    to_json(&value).as_ref().map(display_name).unwrap_or_else(|| "Admin".to_string())
}

pub fn display_name(person: &Value) -> String {
    let text = |key: &str| {
        person
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    if let Some(name) = text("fullName").or_else(|| text("name")) {
        return name.to_string();
    }

    let first_last: Vec<&str> =
        [text("firstName"), text("lastName")].into_iter().flatten().collect();
    if !first_last.is_empty() {
        return first_last.join(" ");
    }

    text("phoneNumber")
        .or_else(|| text("email"))
        .unwrap_or("Admin")
        .to_string()
}

/// Render a named template with a serializable context.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<Html<String>, ApiError> {
    let template = ENV.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

/// Shorthand for the protected pages: wrap the view in the console chrome.
pub fn render_page<T: Serialize>(
    name: &str,
    title: &str,
    active: &str,
    user: &Value,
    flash: Option<Flash>,
    view: T,
) -> Result<Html<String>, ApiError> {
    render(name, Page { title, active, user, flash, view })
}
