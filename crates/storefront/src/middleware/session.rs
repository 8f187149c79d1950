//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. Visitor state lasts as
//! long as the browser session and the process; nothing is persisted.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "codebrew_session";

/// Create the session layer with an in-memory store.
///
/// The cookie has no `Max-Age`, so it ends with the browser session.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
