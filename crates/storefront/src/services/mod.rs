//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Client for the external authentication API
//! - `header` - Login/registration/logout flow behind the page header
//! - `orders` - Per-visitor order accumulation

pub mod auth;
pub mod header;
pub mod orders;

pub use auth::{AuthApiClient, AuthApiError};
pub use header::{AuthHeader, Navigation};
pub use orders::{OrderBook, OrderStore};
