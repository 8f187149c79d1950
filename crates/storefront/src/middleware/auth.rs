//! Authentication state extractors and session helpers.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{AuthState, SessionUser, session_keys};

/// Extractor that optionally gets the signed-in user.
///
/// Never rejects: a missing session or an unreadable record both count as
/// signed out.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.display_name()),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct CurrentUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<AuthState>(session_keys::AUTH_STATE)
                .await
                .ok()
                .flatten()
                .and_then(|state| state.user().cloned()),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Load the visitor's authentication state, or a fresh one.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_auth_state(
    session: &Session,
) -> Result<AuthState, tower_sessions::session::Error> {
    Ok(session
        .get::<AuthState>(session_keys::AUTH_STATE)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's authentication state.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_auth_state(
    session: &Session,
    state: &AuthState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::AUTH_STATE, state).await
}
