//! Authentication route handlers.
//!
//! The header panel posts here. Each handler loads the visitor's
//! [`AuthState`](crate::models::AuthState), lets the header service apply
//! the operation, saves the state back and answers per the HTMX convention
//! in [`super::header::respond`].

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use super::header::{HeaderView, respond};
use crate::error::Result;
use crate::middleware::{CurrentUser, HxRequest, load_auth_state, save_auth_state};
use crate::models::SessionUser;
use crate::services::{AuthHeader, Navigation};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Panel toggle form data.
#[derive(Debug, Deserialize)]
pub struct PanelForm {
    pub return_to: Option<String>,
}

/// Login form data.
///
/// No `Debug`: the password is only wrapped once it leaves the form.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub return_to: Option<String>,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub return_to: Option<String>,
}

/// Logout form data.
#[derive(Debug, Deserialize)]
pub struct LogoutForm {
    pub return_to: Option<String>,
}

/// Body of `GET /api/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: Option<SessionUser>,
}

// =============================================================================
// Panel
// =============================================================================

/// Show or hide the login/registration panel.
#[instrument(skip_all)]
pub async fn toggle_panel(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<PanelForm>,
) -> Result<Response> {
    let mut auth = load_auth_state(&session).await?;
    auth.panel.toggle();
    save_auth_state(&session, &auth).await?;

    let header = HeaderView::load(&state, &session, &auth, return_to(form.return_to.as_ref())).await;
    Ok(respond(hx, Navigation::Stay, header))
}

/// Switch the panel between the login and registration forms.
#[instrument(skip_all)]
pub async fn toggle_mode(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<PanelForm>,
) -> Result<Response> {
    let mut auth = load_auth_state(&session).await?;
    auth.panel.toggle_mode();
    save_auth_state(&session, &auth).await?;

    let header = HeaderView::load(&state, &session, &auth, return_to(form.return_to.as_ref())).await;
    Ok(respond(hx, Navigation::Stay, header))
}

// =============================================================================
// Login / Registration / Logout
// =============================================================================

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let mut auth = load_auth_state(&session).await?;
    let navigation = AuthHeader::new(state.auth_api())
        .submit_login(&mut auth, &form.email, &SecretString::from(form.password))
        .await;
    save_auth_state(&session, &auth).await?;

    let header = HeaderView::load(&state, &session, &auth, return_to(form.return_to.as_ref())).await;
    Ok(respond(hx, navigation, header))
}

/// Handle registration form submission.
///
/// A successful registration signs the visitor in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let mut auth = load_auth_state(&session).await?;
    let navigation = AuthHeader::new(state.auth_api())
        .submit_registration(
            &mut auth,
            &form.name,
            &form.email,
            &SecretString::from(form.password),
        )
        .await;
    save_auth_state(&session, &auth).await?;

    let header = HeaderView::load(&state, &session, &auth, return_to(form.return_to.as_ref())).await;
    Ok(respond(hx, navigation, header))
}

/// Handle logout.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<LogoutForm>,
) -> Result<Response> {
    let mut auth = load_auth_state(&session).await?;
    let navigation = AuthHeader::new(state.auth_api()).logout(&mut auth).await;
    save_auth_state(&session, &auth).await?;

    let header = HeaderView::load(&state, &session, &auth, return_to(form.return_to.as_ref())).await;
    Ok(respond(hx, navigation, header))
}

/// Who is signed in, as JSON.
pub async fn session_info(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(SessionInfo { user })
}

fn return_to(value: Option<&String>) -> &str {
    value.map_or("/", String::as_str)
}
