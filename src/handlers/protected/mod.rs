// handlers/protected/mod.rs - Console pages behind the session gate
//
// Every handler here runs after `require_admin`, so an `AuthenticatedAdmin`
// extension is always present. Reads render a page, even when the backend
// fails; writes end in a redirect carrying a flash.

pub mod analytics;
pub mod dashboard;
pub mod documents;
pub mod drivers;
pub mod trips;
pub mod users;
pub mod withdrawals;

use serde::Deserialize;

/// `hardDelete` as it may arrive in the query string or the form body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardDeleteParam {
    pub hard_delete: Option<String>,
}
