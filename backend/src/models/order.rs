//! Orders placed by customers.
//!
//! Order fields are stored as the client sent them. `name` and `phone` only
//! have to be present and truthy, and `lessons` only has to be an array, so
//! a numeric phone or numeric lesson ids are kept verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

crate::define_id_type!(OrderId);

/// Validated order data, before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: Value,
    pub phone: Value,
    /// Lesson identifiers as sent by the client. Not checked against the store.
    pub lessons: Vec<Value>,
}

impl NewOrder {
    pub fn new<L>(name: impl Into<Value>, phone: impl Into<Value>, lessons: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<Value>,
    {
        Self {
            name: name.into(),
            phone: phone.into(),
            lessons: lessons.into_iter().map(Into::into).collect(),
        }
    }
}

/// A stored order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub name: Value,
    pub phone: Value,
    pub lessons: Vec<Value>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Stamp a validated order with its creation time.
    pub fn from_new(order: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: order.name,
            phone: order.phone,
            lessons: order.lessons,
            created_at,
        }
    }

    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_uses_camel_case_timestamp() {
        let order = Order::from_new(NewOrder::new("Alice", "123", ["a", "b"]), Utc::now());

        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("_id").is_none());
        assert_eq!(value["lessons"], json!(["a", "b"]));
    }

    #[test]
    fn test_numeric_fields_are_kept_verbatim() {
        let order = Order::from_new(NewOrder::new("Alice", 5551234, [1, 2]), Utc::now());

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["phone"], json!(5551234));
        assert_eq!(value["lessons"], json!([1, 2]));
    }

    #[test]
    fn test_with_id() {
        let id = OrderId::generate();
        let order =
            Order::from_new(NewOrder::new("Bob", "555", Vec::<Value>::new()), Utc::now()).with_id(id);

        assert_eq!(order.id, Some(id));
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["_id"], json!(id.to_hex()));
    }
}
