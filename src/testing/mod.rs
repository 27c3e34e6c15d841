use axum::{
    http::header::LOCATION,
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::app::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::config::AppConfig;

/// Handler test fixture: a mock backend plus app state pointed at it.
pub struct TestContext {
    pub server: mockito::ServerGuard,
    pub state: AppState,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        let mut config = AppConfig::development();
        config.upstream.base_url = server.url();
        config.upstream.timeout_secs = 5;

        let state = AppState::new(config).expect("test state");
        Self { server, state }
    }

    /// The administrator the gate would have let through.
    pub fn admin(&self) -> AuthenticatedAdmin {
        AuthenticatedAdmin {
            user: json!({ "_id": "admin-1", "fullName": "Ada Admin", "role": "admin" }),
            access_token: "test-token".to_string(),
        }
    }
}

/// `Location` header of a redirect, as a string.
pub fn location(redirect: Redirect) -> String {
    let response = redirect.into_response();
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Bare HTTP backend on an ephemeral port. Each path in `routes` gets a 200
/// with its JSON body; `stalled_path` is accepted and never answered.
/// Returns the base URL.
pub async fn stalling_backend(
    routes: Vec<(&'static str, &'static str)>,
    stalled_path: &'static str,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") && read < buf.len() {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => read += n,
                    }
                }

                let head = String::from_utf8_lossy(&buf[..read]).into_owned();
                let target = head.split_whitespace().nth(1).unwrap_or("/");
                let path = target.split('?').next().unwrap_or("/");
                if path == stalled_path {
                    // Keep the socket open until the test runtime shuts down.
                    std::future::pending::<()>().await;
                }

                let (status, body) = match routes.iter().find(|(p, _)| *p == path) {
                    Some((_, body)) => ("200 OK", *body),
                    None => ("404 Not Found", r#"{"message":"not found"}"#),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}
