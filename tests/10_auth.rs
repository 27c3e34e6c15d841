mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{location, TestServer};

#[tokio::test]
async fn root_sends_anonymous_visitors_to_login() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.get("/").await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    Ok(())
}

#[tokio::test]
async fn login_page_renders_phone_form() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.get("/login").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains(r#"action="/request-otp""#));
    assert!(body.contains(r#"name="phoneNumber""#));
    Ok(())
}

#[tokio::test]
async fn request_otp_requires_phone() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.post_form("/request-otp", &[("phoneNumber", "   ")]).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("Please enter your phone number."));
    Ok(())
}

#[tokio::test]
async fn request_otp_moves_to_verify_with_backend_message() -> Result<()> {
    let mut server = TestServer::start().await?;
    server
        .stub(
            "POST",
            "/api/v1/auth/admin/login",
            200,
            json!({ "message": "OTP sent to your phone", "data": { "expiresIn": 300 } }),
        )
        .await;

    let res = server.post_form("/request-otp", &[("phoneNumber", " +2348000000001 ")]).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&res),
        concat!(
            "/verify?phoneNumber=%2B2348000000001&message=OTP+sent+to+your+phone",
            "&statusType=success&expiresIn=300"
        )
    );

    let res = server.get(&location(&res)).await?;
    let body = res.text().await?;
    assert!(body.contains("OTP sent to your phone"));
    assert!(body.contains("+2348000000001"));
    Ok(())
}

#[tokio::test]
async fn request_otp_failure_keeps_login_form() -> Result<()> {
    let mut server = TestServer::start().await?;
    server
        .stub("POST", "/api/v1/auth/admin/login", 404, json!({ "message": "Admin not found" }))
        .await;

    let res = server.post_form("/request-otp", &[("phoneNumber", "+2348000000009")]).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("Admin not found"));
    assert!(body.contains("+2348000000009"));
    Ok(())
}

#[tokio::test]
async fn verify_without_code_rerenders() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .post_form("/verify-otp", &[("phoneNumber", "+2348000000001"), ("otp", "")])
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("Provide both phone number and OTP."));
    Ok(())
}

#[tokio::test]
async fn wrong_code_shows_backend_error() -> Result<()> {
    let mut server = TestServer::start().await?;
    server
        .stub("POST", "/api/v1/auth/admin/verify-otp", 401, json!({ "message": "Invalid OTP" }))
        .await;

    let res = server
        .post_form("/verify-otp", &[("phoneNumber", "+2348000000001"), ("otp", "000000")])
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("Invalid OTP"));

    let res = server.get("/dashboard").await?;
    assert_eq!(location(&res), "/login");
    Ok(())
}

#[tokio::test]
async fn resend_otp_always_redirects_to_verify() -> Result<()> {
    let mut server = TestServer::start().await?;

    let res = server.post_form("/resend-otp", &[("phoneNumber", "")]).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/verify?message=Phone+number+is+required&statusType=error");

    server
        .stub("POST", "/api/v1/auth/admin/login", 503, json!({}))
        .await;
    let res = server.post_form("/resend-otp", &[("phoneNumber", "+2348000000001")]).await?;
    assert_eq!(
        location(&res),
        concat!(
            "/verify?phoneNumber=%2B2348000000001",
            "&message=Unable+to+resend+OTP.+Please+try+again.&statusType=error"
        )
    );
    Ok(())
}

#[tokio::test]
async fn forgot_password_reports_backend_answer() -> Result<()> {
    let mut server = TestServer::start().await?;
    server
        .stub(
            "POST",
            "/api/v1/auth/admin/forgot-password",
            200,
            json!({ "message": "Reset instructions sent" }),
        )
        .await;

    let res = server.get("/forgot-password").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.post_form("/forgot-password", &[("phoneNumber", "+2348000000001")]).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("Reset instructions sent"));
    Ok(())
}

#[tokio::test]
async fn login_then_logout() -> Result<()> {
    let mut server = TestServer::start().await?;
    server.login().await?;

    let res = server.get("/").await?;
    assert_eq!(location(&res), "/dashboard");
    let res = server.get("/login").await?;
    assert_eq!(location(&res), "/dashboard");

    let res = server.get("/logout").await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");

    let res = server.get("/dashboard").await?;
    assert_eq!(location(&res), "/login");
    Ok(())
}

#[tokio::test]
async fn verified_user_without_token_is_not_signed_in() -> Result<()> {
    let mut server = TestServer::start().await?;
    server
        .stub(
            "POST",
            "/api/v1/auth/admin/verify-otp",
            200,
            json!({ "message": "Verified", "data": { "user": { "_id": "a1" } } }),
        )
        .await;

    let res = server
        .post_form("/verify-otp", &[("phoneNumber", "+2348000000001"), ("otp", "123456")])
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("We could not verify the OTP. Please try again."));

    // Every entry point agrees the visitor is anonymous.
    assert_eq!(location(&server.get("/dashboard").await?), "/login");
    assert_eq!(location(&server.get("/").await?), "/login");
    assert_eq!(server.get("/login").await?.status(), StatusCode::OK);
    Ok(())
}
