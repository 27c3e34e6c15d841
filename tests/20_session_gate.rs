mod common;

use anyhow::Result;
use reqwest::StatusCode;

use common::{location, TestServer};

const PROTECTED: &[&str] = &[
    "/dashboard",
    "/analytics",
    "/drivers",
    "/drivers/d1",
    "/document-approvals",
    "/trips",
    "/users",
    "/withdrawals",
];

#[tokio::test]
async fn protected_pages_redirect_anonymous_visitors() -> Result<()> {
    let server = TestServer::start().await?;

    for path in PROTECTED {
        let res = server.get(path).await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&res), "/login", "{}", path);
    }
    Ok(())
}

#[tokio::test]
async fn protected_writes_redirect_without_calling_backend() -> Result<()> {
    let mut server = TestServer::start().await?;
    let untouched = server
        .upstream
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for path in ["/drivers/d1/approve", "/users/u1/delete", "/withdrawals/w1/approve"] {
        let res = server.post_form(path, &[]).await?;
        assert_eq!(location(&res), "/login", "{}", path);
    }

    untouched.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn responses_are_never_cached() -> Result<()> {
    let server = TestServer::start().await?;

    for path in ["/login", "/dashboard", "/css/admin.css"] {
        let res = server.get(path).await?;
        assert_eq!(
            res.headers()["cache-control"],
            "no-cache, no-store, must-revalidate",
            "{}",
            path
        );
        assert_eq!(res.headers()["x-litespeed-cache-control"], "no-cache", "{}", path);
    }
    Ok(())
}

#[tokio::test]
async fn signed_in_admin_passes_the_gate() -> Result<()> {
    let mut server = TestServer::start().await?;
    server.login().await?;

    let res = server.get("/analytics").await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("Ada Admin"));
    Ok(())
}

#[tokio::test]
async fn verify_sets_http_only_cookie() -> Result<()> {
    let mut server = TestServer::start().await?;
    server
        .stub(
            "POST",
            "/api/v1/auth/admin/verify-otp",
            200,
            serde_json::json!({ "data": { "user": { "_id": "a" }, "accessToken": "t" } }),
        )
        .await;

    let res = server.post_form("/verify-otp", &[("phoneNumber", "+1"), ("otp", "1")]).await?;
    let cookie = res
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|c| c.starts_with("resq.sid="))
        .unwrap_or_default()
        .to_string();

    assert!(cookie.contains("HttpOnly"), "{}", cookie);
    assert!(cookie.contains("SameSite=Lax"), "{}", cookie);
    Ok(())
}

#[tokio::test]
async fn static_assets_and_favicon_are_public() -> Result<()> {
    let server = TestServer::start().await?;

    assert_eq!(server.get("/css/admin.css").await?.status(), StatusCode::OK);
    assert_eq!(server.get("/js/dashboard.js").await?.status(), StatusCode::OK);
    assert_eq!(server.get("/favicon.ico").await?.status(), StatusCode::OK);
    assert_eq!(server.get("/nope.txt").await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}
