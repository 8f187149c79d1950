//! Domain models for storefront.
//!
//! Signed-in state lives in the visitor's `tower-sessions` session under
//! the keys in [`session_keys`].

pub mod panel;
pub mod session;
pub mod user;

pub use panel::{LoginPanel, PanelMode};
pub use session::{AuthState, UpstreamCookie};
pub use user::SessionUser;

/// Session keys for visitor state.
pub mod session_keys {
    /// Key for the signed-in user, login panel, and upstream cookie.
    pub const AUTH_STATE: &str = "auth_state";

    /// Marks a session that owns an order.
    pub const VISITOR: &str = "visitor";
}
