/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Status changes an administrator can apply to a driver account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverAction {
    Approve,
    Reject,
    Block,
    Unblock,
}

impl DriverAction {
    /// Upstream path segment, also the inbound route segment.
    pub fn segment(self) -> &'static str {
        match self {
            DriverAction::Approve => "approve",
            DriverAction::Reject => "reject",
            DriverAction::Block => "block",
            DriverAction::Unblock => "unblock",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            DriverAction::Approve => "approved",
            DriverAction::Reject => "rejected",
            DriverAction::Block => "blocked",
            DriverAction::Unblock => "unblocked",
        }
    }
}

/// Decision on a single uploaded driver document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentDecision {
    Approve,
    Reject,
}

pub const DEFAULT_DOCUMENT_REJECTION_REASON: &str = "Document rejected by admin";

/// Transitions of a driver payout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalAction {
    Approve,
    Complete,
    Reject,
}

impl WithdrawalAction {
    pub fn segment(self) -> &'static str {
        match self {
            WithdrawalAction::Approve => "approve",
            WithdrawalAction::Complete => "complete",
            WithdrawalAction::Reject => "reject",
        }
    }
}

/// The `hardDelete` flag as the browser sent it.
///
/// The raw string is forwarded upstream untouched (default `"false"`); only
/// the exact value `"true"` counts as a permanent delete for feedback wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardDelete(String);

impl HardDelete {
    /// Query string wins over the form body, then the `"false"` default.
    pub fn resolve(query: Option<&str>, form: Option<&str>) -> Self {
        let value = query
            .filter(|v| !v.is_empty())
            .or(form.filter(|v| !v.is_empty()))
            .unwrap_or("false");
        HardDelete(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_permanent(&self) -> bool {
        self.0 == "true"
    }

    pub fn wording(&self) -> &'static str {
        if self.is_permanent() {
            "permanently deleted"
        } else {
            "deleted"
        }
    }
}

impl Default for HardDelete {
    fn default() -> Self {
        HardDelete("false".to_string())
    }
}
