//! BSON shapes of stored documents.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Order, OrderId};

/// Order as stored: `createdAt` is a native BSON date, not a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: Value,
    pub phone: Value,
    pub lessons: Vec<Value>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
}

impl OrderDocument {
    pub fn from_order(order: &Order) -> Self {
        Self {
            // The store assigns ids; a caller-supplied one is never written.
            id: None,
            name: order.name.clone(),
            phone: order.phone.clone(),
            lessons: order.lessons.clone(),
            created_at: bson::DateTime::from_chrono(order.created_at),
        }
    }

    pub fn into_order(self) -> Order {
        Order {
            id: self.id.map(OrderId::from),
            name: self.name,
            phone: self.phone,
            lessons: self.lessons,
            created_at: self.created_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewOrder;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_created_at_is_bson_date() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let order = Order::from_new(
            NewOrder::new("Alice", "123", ["a", "b"]),
            created_at,
        );

        let document = bson::to_document(&OrderDocument::from_order(&order)).unwrap();
        assert!(document.get_datetime("createdAt").is_ok());
        assert!(!document.contains_key("_id"));

        let decoded: OrderDocument = bson::from_document(document).unwrap();
        let round = decoded.into_order();
        assert_eq!(round.created_at, created_at);
        assert_eq!(round.lessons, order.lessons);
    }
}
