use std::time::{Duration, Instant};

use url::Url;

use super::error::UpstreamError;
use super::payload::Payload;
use super::request::OutboundRequest;

/// HTTP client for the operations backend.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue one call. Any 2xx yields the normalized payload; everything else
    /// is an [`UpstreamError`].
    pub async fn send(&self, request: &OutboundRequest) -> Result<Payload, UpstreamError> {
        let url = request.url(&self.base_url)?;
        let started = Instant::now();

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers());
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "upstream call failed: {}",
                    e
                );
                return Err(UpstreamError::from_reqwest(e));
            }
        };

        let status = response.status();
        let bytes = response.bytes().await.map_err(UpstreamError::from_reqwest)?;
        let payload = Payload::from_bytes(&bytes);

        tracing::debug!(
            method = %request.method,
            path = %request.path(),
            status = status.as_u16(),
            authorized = request.has_bearer(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream call"
        );

        if status.is_success() {
            Ok(payload)
        } else {
            tracing::warn!(
                method = %request.method,
                path = %request.path(),
                status = status.as_u16(),
                message = payload.message().unwrap_or(""),
                "upstream rejected call"
            );
            Err(UpstreamError::Status { status, payload })
        }
    }
}
