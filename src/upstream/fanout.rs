use futures::future::join_all;

use super::client::UpstreamClient;
use super::error::UpstreamError;
use super::payload::Payload;
use super::request::OutboundRequest;

/// Outcome of one call in a fan-out, tagged with the slice it feeds.
#[derive(Debug)]
pub struct Settled<K> {
    pub key: K,
    pub result: Result<Payload, UpstreamError>,
}

/// Issue every request concurrently and wait for all of them. Each outcome is
/// kept separately; one failure never cancels or hides the others.
///
/// The calls run inside the caller's future, so dropping it (client went away)
/// drops every in-flight call with it.
pub async fn settle_all<K>(
    client: &UpstreamClient,
    requests: Vec<(K, OutboundRequest)>,
) -> Vec<Settled<K>> {
    let calls = requests.into_iter().map(|(key, request)| async move {
        let result = client.send(&request).await;
        Settled { key, result }
    });

    join_all(calls).await
}

impl<K: std::fmt::Debug> Settled<K> {
    /// The payload, or an empty one after logging the failure. Used where a
    /// failed slice should render as empty instead of failing the page.
    pub fn or_empty(self) -> Payload {
        match self.result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(slice = ?self.key, "upstream slice degraded to empty: {}", e);
                Payload::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use url::Url;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Slice {
        Good,
        Broken,
    }

    #[tokio::test]
    async fn failures_are_isolated_per_call() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/good")
            .with_status(200)
            .with_body(json!({ "data": [1, 2, 3] }).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/broken")
            .with_status(500)
            .with_body(json!({ "message": "boom" }).to_string())
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let client = UpstreamClient::new(url, Duration::from_secs(5)).unwrap();
        let settled = settle_all(
            &client,
            vec![
                (Slice::Broken, OutboundRequest::get(["broken"])),
                (Slice::Good, OutboundRequest::get(["good"])),
            ],
        )
        .await;

        assert_eq!(settled.len(), 2);
        assert_eq!(settled[0].key, Slice::Broken);
        assert!(settled[0].result.is_err());
        assert_eq!(settled[1].key, Slice::Good);

        let good = settled.into_iter().nth(1).unwrap().or_empty();
        assert_eq!(good.data_list().len(), 3);
    }

    #[tokio::test]
    async fn failed_slice_reads_as_empty_payload() {
        let settled = Settled {
            key: Slice::Broken,
            result: Err(UpstreamError::Timeout),
        };
        assert_eq!(settled.or_empty(), Payload::default());
    }
}
