//! Order line items accumulated during a visit.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A single item added to the current order.
///
/// The menu that produces items owns their shape, so any JSON value is
/// accepted and carried through untouched. Items from the menu look like
/// `{"item": "latte", ...}`.
///
/// ```
/// use codebrew_core::OrderItem;
///
/// let item: OrderItem = serde_json::from_str(r#"{"item":"latte","size":"large"}"#).unwrap();
/// assert_eq!(item.name(), Some("latte"));
/// assert_eq!(item.as_value()["size"], "large");
///
/// let odd: OrderItem = serde_json::from_str(r#"{"price":3}"#).unwrap();
/// assert_eq!(odd.name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItem(Value);

impl OrderItem {
    /// Create `{"item": <name>}`.
    #[must_use]
    pub fn named(item: impl Into<String>) -> Self {
        Self(json!({ "item": item.into() }))
    }

    /// The `item` field, when it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get("item").and_then(Value::as_str)
    }

    /// Text to show for the item: its name, else the `item` field or the
    /// whole value as JSON.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.name(), self.0.get("item")) {
            (Some(name), _) => name.to_owned(),
            (None, Some(item)) => item.to_string(),
            (None, None) => self.0.to_string(),
        }
    }

    /// The item as received.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for OrderItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The ordered sequence of items in the current order.
///
/// Append-only: insertion order is preserved, duplicates are kept, and
/// there is no removal operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderList(Vec<OrderItem>);

impl OrderList {
    /// Create an empty order.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an item to the end of the order.
    pub fn append(&mut self, item: OrderItem) {
        self.0.push(item);
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.0
    }

    /// Number of items in the order.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been ordered yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, OrderItem> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a OrderList {
    type Item = &'a OrderItem;
    type IntoIter = std::slice::Iter<'a, OrderItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<OrderItem> for OrderList {
    fn from_iter<I: IntoIterator<Item = OrderItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
