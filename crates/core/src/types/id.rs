//! Identifier of a signed-in customer.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A user ID as issued by the authentication API.
///
/// The API is an external collaborator, so the ID is kept in whatever shape
/// it was sent: a JSON number or a string (document stores hand out hex
/// object IDs). Serialization writes back the same shape.
///
/// ```
/// use codebrew_core::UserId;
///
/// let numeric: UserId = serde_json::from_str("1").unwrap();
/// assert_eq!(numeric, UserId::Numeric(1));
///
/// let text: UserId = serde_json::from_str("\"65f0c2\"").unwrap();
/// assert_eq!(text.to_string(), "65f0c2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Integer ID (relational backends).
    Numeric(i64),
    /// Opaque string ID.
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}
