//! Integration tests for the header login/registration/logout flow.

#![allow(clippy::unwrap_used)]

use codebrew_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_login(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "a@b.com", "password": "x" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "api_sid=s3cret; Path=/; HttpOnly")
                .set_body_json(json!({ "user": { "id": 1, "name": "A" } })),
        )
        .mount(&ctx.auth_api)
        .await;
}

// ============================================================================
// Panel
// ============================================================================

#[tokio::test]
async fn test_panel_opens_and_switches_to_registration() {
    let ctx = TestContext::new().await;

    let html = ctx
        .htmx_post("/auth/panel", &[("return_to", "/")])
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("Close"));
    assert!(html.contains(r#"action="/auth/login""#));

    let html = ctx
        .htmx_post("/auth/panel/mode", &[("return_to", "/")])
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"action="/auth/register""#));

    let html = ctx
        .htmx_post("/auth/panel", &[("return_to", "/")])
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("Login / Register"));
    assert!(!html.contains(r#"action="/auth/register""#));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_populates_session_and_closes_panel() {
    let ctx = TestContext::new().await;
    mount_login(&ctx).await;

    ctx.htmx_post("/auth/panel", &[("return_to", "/")]).await;
    let response = ctx
        .htmx_post(
            "/auth/login",
            &[("email", "a@b.com"), ("password", "x"), ("return_to", "/")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("hx-redirect").unwrap(), "/");

    assert_eq!(ctx.session_user().await, json!({ "id": 1, "name": "A" }));

    let home = ctx.page("/").await;
    assert!(home.contains("Hi, A"));
    assert!(home.contains("Logout"));
    assert!(!home.contains(r#"action="/auth/login""#));
}

#[tokio::test]
async fn test_rejected_login_keeps_session_and_shows_message() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "nope" })))
        .mount(&ctx.auth_api)
        .await;

    ctx.htmx_post("/auth/panel", &[("return_to", "/")]).await;
    let html = ctx
        .htmx_post(
            "/auth/login",
            &[("email", "a@b.com"), ("password", "bad"), ("return_to", "/")],
        )
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Invalid credentials. Please try again."));
    assert!(html.contains(r#"value="a@b.com""#));
    assert!(ctx.session_user().await.is_null());
}

#[tokio::test]
async fn test_plain_form_login_lands_on_home() {
    let ctx = TestContext::new().await;
    mount_login(&ctx).await;

    let response = ctx
        .form_post(
            "/auth/login",
            &[("email", "a@b.com"), ("password", "x"), ("return_to", "/orders")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.url().path(), "/");
    assert_eq!(ctx.session_user().await["name"], "A");
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_registration_signs_in() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(
            json!({ "name": "Bea", "email": "bea@b.com", "password": "pw" }),
        ))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "user": { "id": "u-2", "name": "Bea" } })),
        )
        .mount(&ctx.auth_api)
        .await;

    let response = ctx
        .htmx_post(
            "/auth/register",
            &[
                ("name", "Bea"),
                ("email", "bea@b.com"),
                ("password", "pw"),
                ("return_to", "/"),
            ],
        )
        .await;

    assert_eq!(response.headers().get("hx-redirect").unwrap(), "/");
    assert_eq!(ctx.session_user().await["id"], "u-2");
}

#[tokio::test]
async fn test_registration_rejected_with_400() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "taken" })))
        .mount(&ctx.auth_api)
        .await;

    ctx.htmx_post("/auth/panel", &[("return_to", "/")]).await;
    ctx.htmx_post("/auth/panel/mode", &[("return_to", "/")]).await;
    let html = ctx
        .htmx_post(
            "/auth/register",
            &[
                ("name", "Bea"),
                ("email", "bea@b.com"),
                ("password", "pw"),
                ("return_to", "/"),
            ],
        )
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Registration failed. Try again."));
    assert!(ctx.session_user().await.is_null());
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_clears_session_and_relays_cookie() {
    let ctx = TestContext::new().await;
    mount_login(&ctx).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("cookie", "api_sid=s3cret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.auth_api)
        .await;

    ctx.htmx_post(
        "/auth/login",
        &[("email", "a@b.com"), ("password", "x"), ("return_to", "/")],
    )
    .await;
    assert!(!ctx.session_user().await.is_null());

    let response = ctx.htmx_post("/auth/logout", &[("return_to", "/")]).await;
    assert_eq!(response.headers().get("hx-redirect").unwrap(), "/");
    assert!(ctx.session_user().await.is_null());
}

#[tokio::test]
async fn test_failed_logout_keeps_session() {
    let ctx = TestContext::new().await;
    mount_login(&ctx).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.auth_api)
        .await;

    ctx.htmx_post(
        "/auth/login",
        &[("email", "a@b.com"), ("password", "x"), ("return_to", "/")],
    )
    .await;

    let html = ctx
        .htmx_post("/auth/logout", &[("return_to", "/")])
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Failed to log out. Try again."));
    assert!(html.contains("Logout"));
    assert_eq!(ctx.session_user().await["name"], "A");
}
