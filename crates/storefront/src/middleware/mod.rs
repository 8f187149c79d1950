//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, per-request hub)
//! 2. `TraceLayer` (request tracing span)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! Extractors that read the session live here too.

pub mod auth;
pub mod htmx;
pub mod request_id;
pub mod session;

pub use auth::{CurrentUser, load_auth_state, save_auth_state};
pub use htmx::HxRequest;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
