//! Data Transfer Objects for the HTTP API.
//!
//! Lessons are returned as-is (see [`crate::models::Lesson`]); these DTOs
//! cover request bodies, query strings and the confirmation envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{LessonPatch, NewOrder, OrderId};

/// Error message for any malformed order body.
pub const INVALID_ORDER_MESSAGE: &str = "Invalid order data";

/// Request body for placing an order.
///
/// Fields are kept loosely typed so that a wrong type is reported as a 400
/// by [`CreateOrderRequest::validate`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub lessons: Option<Value>,
}

impl CreateOrderRequest {
    /// Check that `name` and `phone` are present and truthy and that
    /// `lessons` is an array. Values are passed through unchanged.
    pub fn validate(self) -> Result<NewOrder, String> {
        let name = self.name.filter(is_truthy).ok_or("name is required")?;
        let phone = self.phone.filter(is_truthy).ok_or("phone is required")?;

        let Some(Value::Array(lessons)) = self.lessons else {
            return Err("lessons must be an array".to_string());
        };

        Ok(NewOrder {
            name,
            phone,
            lessons,
        })
    }
}

/// `null`, `false`, zero and `""` are falsy. Every other value, including
/// empty arrays and objects, is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Response for order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// Response for a lesson update, echoing the fields that were set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLessonResponse {
    pub success: bool,
    pub message: String,
    pub updated: LessonPatch,
}

/// Query parameters for the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Free-text term; missing means empty
    #[serde(default)]
    pub q: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
