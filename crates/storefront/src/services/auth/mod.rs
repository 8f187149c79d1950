//! Client for the external authentication API.
//!
//! The storefront does not own accounts. Login, registration, and logout are
//! forwarded to an API that already exists:
//!
//! ```text
//! POST /api/auth/login     {email, password}        -> {user}
//! POST /api/auth/register  {name, email, password}  -> {user}
//! POST /api/auth/logout                             -> 2xx, body ignored
//! ```
//!
//! Each call is a single attempt; there is no retry and no timeout beyond
//! what the transport reports.

mod error;

pub use error::AuthApiError;

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{SessionUser, UpstreamCookie};

/// Login request body.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registration request body.
#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Success body of login and registration.
#[derive(Deserialize)]
struct UserEnvelope {
    user: SessionUser,
}

/// A successful login or registration.
#[derive(Debug)]
pub struct SignedIn {
    /// Identity returned by the API.
    pub user: SessionUser,
    /// Cookies the API set for its own session.
    pub upstream_cookie: Option<UpstreamCookie>,
}

/// Authentication API client.
#[derive(Clone)]
pub struct AuthApiClient {
    client: reqwest::Client,
    login_url: Url,
    register_url: Url,
    logout_url: Url,
}

impl AuthApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URLs cannot be built or the HTTP client
    /// fails to build.
    pub fn new(base_url: &Url) -> Result<Self, AuthApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("codebrew-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            login_url: base_url.join("api/auth/login")?,
            register_url: base_url.join("api/auth/register")?,
            logout_url: base_url.join("api/auth/logout")?,
        })
    }

    /// Exchange credentials for the user's identity.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API rejects the credentials,
    /// or the response carries no user.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SignedIn, AuthApiError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let response = self.client.post(self.login_url.clone()).json(&body).send().await?;
        signed_in(response).await
    }

    /// Create an account; the returned identity counts as signed in.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API refuses the registration,
    /// or the response carries no user.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<SignedIn, AuthApiError> {
        let body = RegisterRequest {
            name,
            email,
            password: password.expose_secret(),
        };
        let response = self
            .client
            .post(self.register_url.clone())
            .json(&body)
            .send()
            .await?;
        signed_in(response).await
    }

    /// Tell the API the user signed out.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API answers with a
    /// non-success status.
    pub async fn logout(&self, upstream_cookie: Option<&UpstreamCookie>) -> Result<(), AuthApiError> {
        let request = with_cookie(self.client.post(self.logout_url.clone()), upstream_cookie);
        let response = request.send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

fn with_cookie(request: RequestBuilder, cookie: Option<&UpstreamCookie>) -> RequestBuilder {
    match cookie {
        Some(cookie) => request.header(COOKIE, cookie.as_header_value()),
        None => request,
    }
}

/// Turn a non-success status into `AuthApiError::Api`, keeping the body.
async fn ensure_success(response: Response) -> Result<Response, AuthApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(AuthApiError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn signed_in(response: Response) -> Result<SignedIn, AuthApiError> {
    let response = ensure_success(response).await?;

    let upstream_cookie = UpstreamCookie::from_set_cookie(
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    );

    let body = response.text().await?;
    let envelope: UserEnvelope =
        serde_json::from_str(&body).map_err(|e| AuthApiError::Parse(e.to_string()))?;

    Ok(SignedIn {
        user: envelope.user,
        upstream_cookie,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use codebrew_core::UserId;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AuthApiClient {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        AuthApiClient::new(&base).unwrap()
    }

    #[tokio::test]
    async fn test_login_sends_credentials_and_reads_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "email": "a@b.com", "password": "x" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc; Path=/; HttpOnly")
                    .set_body_json(json!({ "user": { "id": 1, "name": "A" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let signed_in = client
            .login("a@b.com", &SecretString::from("x"))
            .await
            .unwrap();

        assert_eq!(signed_in.user.id, UserId::from(1));
        assert_eq!(signed_in.user.name.as_deref(), Some("A"));
        assert_eq!(
            signed_in.upstream_cookie.unwrap().as_header_value(),
            "sid=abc"
        );
    }

    #[tokio::test]
    async fn test_login_rejection_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad password"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .login("a@b.com", &SecretString::from("wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("bad password"));
    }

    #[tokio::test]
    async fn test_success_without_user_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "user": null })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .register("A", "a@b.com", &SecretString::from("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_register_sends_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(
                json!({ "name": "Ada", "email": "ada@b.com", "password": "pw" }),
            ))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "user": { "id": "u1" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let signed_in = client
            .register("Ada", "ada@b.com", &SecretString::from("pw"))
            .await
            .unwrap();

        assert_eq!(signed_in.user.id, UserId::from("u1"));
        assert!(signed_in.upstream_cookie.is_none());
    }

    #[tokio::test]
    async fn test_logout_relays_cookie_and_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("cookie", "sid=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let cookie = UpstreamCookie::from_set_cookie(["sid=abc"]).unwrap();
        client.logout(Some(&cookie)).await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.logout(None).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_http_error() {
        // Nothing listens on port 9 of the loopback interface.
        let base = Url::parse("http://127.0.0.1:9/").unwrap();
        let client = AuthApiClient::new(&base).unwrap();
        let err = client.logout(None).await.unwrap_err();
        assert!(matches!(err, AuthApiError::Http(_)));
    }

    #[test]
    fn test_endpoints_join_under_base_path() {
        let base = Url::parse("http://auth.internal/v1/").unwrap();
        let client = AuthApiClient::new(&base).unwrap();
        assert_eq!(
            client.login_url.as_str(),
            "http://auth.internal/v1/api/auth/login"
        );
        assert_eq!(
            client.logout_url.as_str(),
            "http://auth.internal/v1/api/auth/logout"
        );
    }
}
