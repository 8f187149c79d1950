//! Integration tests for CodeBrew Café.
//!
//! Each test boots the real storefront router on an ephemeral port, with a
//! `wiremock` server standing in for the authentication API, and drives it
//! with a cookie-keeping `reqwest` client the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p codebrew-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;

use codebrew_storefront::{config::StorefrontConfig, routes, state::AppState};
use reqwest::Client;
use url::Url;
use wiremock::MockServer;

/// A running storefront plus its fake authentication API.
pub struct TestContext {
    /// Browser-like client; keeps the session cookie between requests.
    pub client: Client,
    pub base_url: String,
    pub auth_api: MockServer,
}

impl TestContext {
    /// Start the mock API and the storefront.
    pub async fn new() -> Self {
        let auth_api = MockServer::start().await;
        let auth_url = Url::parse(&auth_api.uri()).expect("mock server URI is a URL");

        let state = AppState::new(StorefrontConfig::for_auth_api(auth_url))
            .expect("Failed to initialize application state");
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            auth_api,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Post a form the way HTMX does.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("request failed")
    }

    /// Post a plain HTML form, following the redirect.
    pub async fn form_post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("request failed")
    }

    /// Fetch a page as text.
    pub async fn page(&self, path: &str) -> String {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
            .text()
            .await
            .expect("body is text")
    }

    /// The signed-in user as reported by `/api/session`.
    pub async fn session_user(&self) -> serde_json::Value {
        let body: serde_json::Value = self
            .client
            .get(self.url("/api/session"))
            .send()
            .await
            .expect("request failed")
            .json()
            .await
            .expect("body is JSON");
        body.get("user").cloned().unwrap_or_default()
    }
}
