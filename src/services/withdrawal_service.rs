use serde::Serialize;
use serde_json::{json, Value};

use crate::types::WithdrawalAction;
use crate::upstream::{endpoints, settle_all, ListQuery, UpstreamClient, UpstreamError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    List,
    Statistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalsView {
    pub withdrawals: Vec<Value>,
    pub pagination: Value,
    pub stats: Value,
}

#[derive(Debug, Clone)]
pub struct WithdrawalsLoad {
    pub view: WithdrawalsView,
    /// The list call failed; statistics may still be present.
    pub list_failed: bool,
}

fn default_pagination() -> Value {
    json!({ "page": 1, "limit": 10, "total": 0, "pages": 1 })
}

pub struct WithdrawalService<'a> {
    client: &'a UpstreamClient,
}

impl<'a> WithdrawalService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    /// List page and summary statistics, fetched together.
    ///
    /// Only `page`, `limit` and `status` are forwarded: the withdrawals
    /// endpoint has no free-text search.
    pub async fn load(&self, query: &ListQuery, token: Option<&str>) -> WithdrawalsLoad {
        let query = ListQuery {
            search: String::new(),
            document_status: String::new(),
            ..query.clone()
        };
        let requests = vec![
            (Slice::List, endpoints::list_withdrawals(&query).bearer(token)),
            (Slice::Statistics, endpoints::withdrawal_statistics().bearer(token)),
        ];

        let mut view = WithdrawalsView {
            withdrawals: Vec::new(),
            pagination: default_pagination(),
            stats: json!({}),
        };
        let mut list_failed = false;

        for settled in settle_all(self.client, requests).await {
            match settled.key {
                Slice::List => match settled.result {
                    Ok(payload) => {
                        let data = payload.data();
                        view.withdrawals = data.list("withdrawals").to_vec();
                        view.pagination =
                            data.section("pagination").to_value_or(default_pagination());
                    }
                    Err(e) => {
                        tracing::warn!("withdrawal list unavailable: {}", e);
                        list_failed = true;
                    }
                },
                Slice::Statistics => {
                    view.stats = settled.or_empty().data().section("summary").to_value();
                }
            }
        }

        WithdrawalsLoad { view, list_failed }
    }

    /// Apply a payout transition. The body is `{}` for approve, `{notes}` for
    /// complete and `{rejectionReason}` for reject.
    pub async fn apply(
        &self,
        withdrawal_id: &str,
        action: WithdrawalAction,
        body: Value,
        token: Option<&str>,
    ) -> Result<(), UpstreamError> {
        let request = endpoints::withdrawal_action(withdrawal_id, action, body).bearer(token);
        self.client.send(&request).await?;
        tracing::info!(
            withdrawal_id = %withdrawal_id,
            action = action.segment(),
            "withdrawal updated"
        );
        Ok(())
    }
}
