//! Catalog of the operations backend endpoints used by the console.
//!
//! Each function returns an unauthenticated [`OutboundRequest`]; callers
//! attach the session token with [`OutboundRequest::bearer`].

use serde_json::json;

use super::request::{ListQuery, OutboundRequest};
use crate::types::{
    DocumentDecision, DriverAction, HardDelete, WithdrawalAction, DEFAULT_DOCUMENT_REJECTION_REASON,
};

const AUTH: [&str; 4] = ["api", "v1", "auth", "admin"];
const ADMIN: [&str; 3] = ["api", "v1", "admin"];

fn auth(path: &[&str]) -> Vec<String> {
    AUTH.iter().chain(path.iter()).map(|s| s.to_string()).collect()
}

fn admin(path: &[&str]) -> Vec<String> {
    ADMIN.iter().chain(path.iter()).map(|s| s.to_string()).collect()
}

// Authentication

pub fn request_otp(phone_number: &str) -> OutboundRequest {
    OutboundRequest::post(auth(&["login"])).json(json!({ "phoneNumber": phone_number }))
}

pub fn verify_otp(phone_number: &str, otp: &str) -> OutboundRequest {
    OutboundRequest::post(auth(&["verify-otp"]))
        .json(json!({ "phoneNumber": phone_number, "otp": otp }))
}

pub fn forgot_password(phone_number: &str) -> OutboundRequest {
    OutboundRequest::post(auth(&["forgot-password"])).json(json!({ "phoneNumber": phone_number }))
}

// Dashboard

pub fn dashboard_stats() -> OutboundRequest {
    OutboundRequest::get(admin(&["dashboard", "stats"]))
}

pub fn pending_drivers() -> OutboundRequest {
    OutboundRequest::get(admin(&["drivers", "pending"]))
}

pub fn all_drivers() -> OutboundRequest {
    OutboundRequest::get(admin(&["drivers"]))
}

pub fn bookings() -> OutboundRequest {
    OutboundRequest::get(admin(&["bookings"]))
}

// Drivers

pub fn list_drivers(query: &ListQuery) -> OutboundRequest {
    OutboundRequest::get(admin(&["drivers"])).list_query(query)
}

pub fn driver(driver_id: &str) -> OutboundRequest {
    OutboundRequest::get(admin(&["drivers", driver_id]))
}

pub fn driver_action(driver_id: &str, action: DriverAction) -> OutboundRequest {
    OutboundRequest::post(admin(&["drivers", driver_id, action.segment()])).json(json!({}))
}

pub fn delete_driver(driver_id: &str, hard_delete: &HardDelete) -> OutboundRequest {
    OutboundRequest::delete(admin(&["drivers", driver_id]))
        .query("hardDelete", hard_delete.as_str())
}

// Documents

pub fn pending_documents(query: &ListQuery) -> OutboundRequest {
    OutboundRequest::get(admin(&["drivers", "documents"])).list_query(query)
}

pub fn review_document(
    driver_id: &str,
    document_id: &str,
    decision: DocumentDecision,
) -> OutboundRequest {
    let body = match decision {
        DocumentDecision::Approve => json!({ "status": "approved" }),
        DocumentDecision::Reject => json!({
            "status": "rejected",
            "rejectionReason": DEFAULT_DOCUMENT_REJECTION_REASON,
        }),
    };
    OutboundRequest::patch(admin(&["drivers", driver_id, "documents", document_id])).json(body)
}

// Trips and users

pub fn list_trips(query: &ListQuery) -> OutboundRequest {
    OutboundRequest::get(admin(&["trips"])).list_query(query)
}

pub fn list_users(query: &ListQuery) -> OutboundRequest {
    OutboundRequest::get(admin(&["users"])).list_query(query)
}

pub fn delete_user(user_id: &str, hard_delete: &HardDelete) -> OutboundRequest {
    OutboundRequest::delete(admin(&["users", user_id])).query("hardDelete", hard_delete.as_str())
}

// Withdrawals

pub fn list_withdrawals(query: &ListQuery) -> OutboundRequest {
    OutboundRequest::get(admin(&["withdrawals"])).list_query(query)
}

pub fn withdrawal_statistics() -> OutboundRequest {
    OutboundRequest::get(admin(&["withdrawals", "statistics"]))
}

pub fn withdrawal_action(
    withdrawal_id: &str,
    action: WithdrawalAction,
    body: serde_json::Value,
) -> OutboundRequest {
    OutboundRequest::patch(admin(&["withdrawals", withdrawal_id, action.segment()])).json(body)
}
