//! Order store.
//!
//! Items added to the current order are kept in memory per visitor, keyed
//! by session id, for as long as the session lives. The list only grows.
//!
//! Orders are not part of the session record. Every request that touches
//! the session writes its whole record back when the response finishes, so
//! a slow login would otherwise restore the order it read before an append
//! made in the meantime.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::Session;
use tower_sessions::session::{Error as SessionError, Id};
use tower_sessions::session_store::Error as StoreError;

use codebrew_core::{OrderItem, OrderList};

use crate::error::add_breadcrumb;
use crate::models::session_keys;

/// How long an untouched order is kept; matches the session store's
/// default record lifetime.
pub const ORDER_IDLE_TIMEOUT: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// The current order of every visitor, keyed by session id.
///
/// Each visitor's list sits behind its own lock, so appends from one
/// visitor are serialized without blocking anyone else.
#[derive(Clone)]
pub struct OrderBook {
    orders: Cache<Id, Arc<Mutex<OrderList>>>,
}

impl OrderBook {
    /// Create an empty book that forgets orders untouched for `idle_timeout`.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            orders: Cache::builder().time_to_idle(idle_timeout).build(),
        }
    }

    async fn entry(&self, id: Id) -> Arc<Mutex<OrderList>> {
        self.orders
            .get_with(id, async { Arc::new(Mutex::new(OrderList::new())) })
            .await
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new(ORDER_IDLE_TIMEOUT)
    }
}

/// Order store for one visitor.
pub struct OrderStore<'a> {
    session: &'a Session,
    book: &'a OrderBook,
}

impl<'a> OrderStore<'a> {
    /// Create a store for the visitor owning `session`.
    #[must_use]
    pub const fn new(session: &'a Session, book: &'a OrderBook) -> Self {
        Self { session, book }
    }

    /// Add an item to the end of the order and return the updated order.
    ///
    /// A visitor without a stored session gets one here, so the order has
    /// an id to live under.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn append(&self, item: OrderItem) -> Result<OrderList, SessionError> {
        let id = self.visitor_id().await?;
        let entry = self.book.entry(id).await;
        let mut orders = entry.lock().await;

        let label = item.label();
        add_breadcrumb("order", "Item added to order", Some(&[("item", label.as_str())]));
        orders.append(item);

        tracing::debug!(count = orders.len(), "Order updated");
        Ok(orders.clone())
    }

    /// The items ordered so far, in the order they were added.
    pub async fn current_orders(&self) -> OrderList {
        let Some(id) = self.session.id() else {
            return OrderList::new();
        };
        match self.book.orders.get(&id).await {
            Some(entry) => entry.lock().await.clone(),
            None => OrderList::new(),
        }
    }

    /// Id of a session that exists in the store.
    ///
    /// Reading the marker loads the record first, which drops an id the
    /// store no longer knows.
    async fn visitor_id(&self) -> Result<Id, SessionError> {
        if self
            .session
            .get::<bool>(session_keys::VISITOR)
            .await?
            .is_some()
            && let Some(id) = self.session.id()
        {
            return Ok(id);
        }

        self.session.insert(session_keys::VISITOR, true).await?;
        self.session.save().await?;
        self.session.id().ok_or_else(|| {
            SessionError::Store(StoreError::Backend(
                "session has no id after save".to_string(),
            ))
        })
    }
}
