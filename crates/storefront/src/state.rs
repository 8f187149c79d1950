//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{AuthApiClient, AuthApiError, OrderBook};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Signed-in state lives in the
/// session; orders live in the order book, keyed by session id.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    auth_api: AuthApiClient,
    orders: OrderBook,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the authentication API client cannot be built
    /// from the configured base URL.
    pub fn new(config: StorefrontConfig) -> Result<Self, AuthApiError> {
        let auth_api = AuthApiClient::new(&config.auth_api_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                auth_api,
                orders: OrderBook::default(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the authentication API client.
    #[must_use]
    pub fn auth_api(&self) -> &AuthApiClient {
        &self.inner.auth_api
    }

    /// Get a reference to every visitor's current order.
    #[must_use]
    pub fn orders(&self) -> &OrderBook {
        &self.inner.orders
    }
}
