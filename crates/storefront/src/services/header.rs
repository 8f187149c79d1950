//! Header authentication flow.
//!
//! Drives the login/registration panel: forwards submissions to the
//! authentication API and applies the outcome to the visitor's
//! [`AuthState`]. This is the only code that signs a visitor in or out.

use codebrew_core::Email;
use secrecy::SecretString;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::AuthState;
use crate::services::auth::{AuthApiClient, SignedIn};

/// Shown when the API rejects a login for any reason.
pub const LOGIN_FAILED: &str = "Invalid credentials. Please try again.";

/// Shown when the API refuses a registration for any reason.
pub const REGISTRATION_FAILED: &str = "Registration failed. Try again.";

/// Shown when the logout call fails.
pub const LOGOUT_FAILED: &str = "Failed to log out. Try again.";

/// Where the visitor goes after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Send the visitor to the home page.
    Home,
    /// Stay on the current page and re-render the header.
    Stay,
}

/// Header authentication service.
pub struct AuthHeader<'a> {
    api: &'a AuthApiClient,
}

impl<'a> AuthHeader<'a> {
    /// Create the service on top of the authentication API client.
    #[must_use]
    pub const fn new(api: &'a AuthApiClient) -> Self {
        Self { api }
    }

    /// Submit the login form.
    ///
    /// On success the user replaces any previous identity and the panel
    /// closes. On failure the identity is untouched and the panel shows
    /// [`LOGIN_FAILED`].
    pub async fn submit_login(
        &self,
        state: &mut AuthState,
        email: &str,
        password: &SecretString,
    ) -> Navigation {
        state.panel.email = email.to_owned();

        match self.api.login(email, password).await {
            Ok(signed_in) => {
                tracing::info!("Login succeeded");
                sign_in(state, signed_in);
                Navigation::Home
            }
            Err(_) => {
                tracing::info!("Login failed");
                state.panel.fail(LOGIN_FAILED);
                Navigation::Stay
            }
        }
    }

    /// Submit the registration form.
    ///
    /// A successful registration signs the visitor in. A failure leaves the
    /// identity untouched, shows [`REGISTRATION_FAILED`], and logs the
    /// cause.
    pub async fn submit_registration(
        &self,
        state: &mut AuthState,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Navigation {
        state.panel.name = name.to_owned();
        state.panel.email = email.to_owned();

        match self.api.register(name, email, password).await {
            Ok(signed_in) => {
                tracing::info!("Registration succeeded");
                sign_in(state, signed_in);
                Navigation::Home
            }
            Err(e) => {
                tracing::error!(error = %e, "Registration error");
                state.panel.fail(REGISTRATION_FAILED);
                Navigation::Stay
            }
        }
    }

    /// Sign out.
    ///
    /// The identity is cleared only once the API confirms; on failure it is
    /// kept and [`LOGOUT_FAILED`] is shown.
    pub async fn logout(&self, state: &mut AuthState) -> Navigation {
        match self.api.logout(state.upstream_cookie()).await {
            Ok(()) => {
                tracing::info!("Logout succeeded");
                state.sign_out();
                clear_sentry_user();
                Navigation::Home
            }
            Err(_) => {
                tracing::warn!("Logout failed");
                state.panel.fail(LOGOUT_FAILED);
                Navigation::Stay
            }
        }
    }
}

fn sign_in(state: &mut AuthState, signed_in: SignedIn) {
    set_sentry_user(
        &signed_in.user.id,
        signed_in.user.email.as_ref().map(Email::as_str),
    );
    state.sign_in(signed_in.user, signed_in.upstream_cookie);
}
