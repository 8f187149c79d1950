//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use super::{LoginPanel, SessionUser};

/// Cookie pairs the authentication API set on a successful sign-in.
///
/// Replayed as a `Cookie` header on logout so the upstream session can be
/// invalidated. Implements `Debug` manually to redact the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpstreamCookie(String);

impl UpstreamCookie {
    /// Build the relay from raw `Set-Cookie` header values.
    ///
    /// Keeps only the `name=value` pair of each header; attributes such as
    /// `Path` or `HttpOnly` are for browsers. Returns `None` when nothing
    /// usable was set.
    pub fn from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let pairs: Vec<&str> = headers
            .into_iter()
            .filter_map(|header| header.split(';').next())
            .map(str::trim)
            .filter(|pair| pair.split_once('=').is_some_and(|(name, _)| !name.is_empty()))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(Self(pairs.join("; ")))
        }
    }

    /// Value for an outgoing `Cookie` header.
    #[must_use]
    pub fn as_header_value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for UpstreamCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UpstreamCookie([REDACTED])")
    }
}

/// Per-visitor authentication state.
///
/// `user` is either absent or a complete record from the authentication
/// API. It is only written by [`AuthState::sign_in`] and
/// [`AuthState::sign_out`], which the header service calls after the API
/// has answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    user: Option<SessionUser>,
    pub panel: LoginPanel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upstream_cookie: Option<UpstreamCookie>,
}

impl AuthState {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Cookie relay for the upstream session.
    #[must_use]
    pub const fn upstream_cookie(&self) -> Option<&UpstreamCookie> {
        self.upstream_cookie.as_ref()
    }

    /// Replace the identity with one returned by the API and close the panel.
    pub(crate) fn sign_in(&mut self, user: SessionUser, cookie: Option<UpstreamCookie>) {
        self.user = Some(user);
        self.upstream_cookie = cookie;
        self.panel.close();
    }

    /// Forget the identity and the upstream cookie.
    pub(crate) fn sign_out(&mut self) {
        self.user = None;
        self.upstream_cookie = None;
        self.panel.error = None;
    }
}
