#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use mockito::{Matcher, Mock, ServerGuard};
use reqwest::{redirect::Policy, Response};
use serde_json::json;

use resq_admin::{app, config::AppConfig, AppState};

/// The console bound to a free port, talking to a mock backend.
pub struct TestServer {
    pub base_url: String,
    pub upstream: ServerGuard,
    pub client: reqwest::Client,
    mocks: Vec<Mock>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        init_tracing();

        let upstream = mockito::Server::new_async().await;
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.upstream.base_url = upstream.url();
        config.upstream.timeout_secs = 5;
        config.session.secure_cookies = false;

        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .context("failed to bind test listener")?;
        let router = app(AppState::new(config)?);
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        // Follow no redirects so tests can inspect `Location`; keep cookies so
        // the session survives between requests.
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        let server = Self {
            base_url,
            upstream,
            client,
            mocks: Vec::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.client.get(self.url("/login")).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Keep a mock registered for the life of the server.
    pub fn keep(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Sign in through the real OTP form against a backend that accepts any code.
    pub async fn login(&mut self) -> Result<()> {
        let mock = self
            .upstream
            .mock("POST", "/api/v1/auth/admin/verify-otp")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "Login successful",
                    "data": {
                        "user": { "_id": "admin-1", "fullName": "Ada Admin", "role": "admin" },
                        "accessToken": "acc-token",
                        "refreshToken": "ref-token"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;
        self.keep(mock);

        let res = self
            .post_form("/verify-otp", &[("phoneNumber", "+2348000000001"), ("otp", "123456")])
            .await?;
        anyhow::ensure!(
            location(&res) == "/dashboard",
            "login did not reach the dashboard: {} {:?}",
            res.status(),
            location(&res)
        );
        Ok(())
    }

    /// Register a JSON answer for `method path`, ignoring the query string.
    pub async fn stub(&mut self, method: &str, path: &str, status: usize, body: serde_json::Value) {
        let mock = self
            .upstream
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;
        self.keep(mock);
    }
}

pub fn location(res: &Response) -> String {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
