//! Signed-in user identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use codebrew_core::{Email, UserId};

/// The identity record returned by the authentication API.
///
/// Only `id` is required. Fields the storefront does not know about are
/// kept in `extra` so the record stays exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID; `_id` is accepted from document-store backends.
    #[serde(alias = "_id")]
    pub id: UserId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// Any other fields from the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// Name shown in the header: the user's name, else their email, else the ID.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_owned)
            .or_else(|| self.email.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| self.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_user_round_trips() {
        let raw = json!({ "id": 1, "name": "A" });
        let user: SessionUser = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id, UserId::from(1));
        assert_eq!(user.name.as_deref(), Some("A"));
        assert!(user.email.is_none());
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let raw = json!({ "id": "u-7", "email": "a@b.com", "loyaltyPoints": 120 });
        let user: SessionUser = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.extra.get("loyaltyPoints"), Some(&json!(120)));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_underscore_id_alias() {
        let user: SessionUser =
            serde_json::from_value(json!({ "_id": "65f0c2", "name": "Bea" })).unwrap();
        assert_eq!(user.id, UserId::from("65f0c2"));
    }

    #[test]
    fn test_id_is_required() {
        assert!(serde_json::from_value::<SessionUser>(json!({ "name": "A" })).is_err());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user: SessionUser =
            serde_json::from_value(json!({ "id": 3, "name": "Ada", "email": "ada@b.com" }))
                .unwrap();
        assert_eq!(user.display_name(), "Ada");

        user.name = Some("  ".to_string());
        assert_eq!(user.display_name(), "ada@b.com");

        user.email = None;
        assert_eq!(user.display_name(), "3");
    }
}
