//! Order messages as they arrive and as they are stored.
//!
//! [`OrderMessage`] is the decoded wire shape: every field is optional so a
//! message with gaps still decodes, and the validator can name exactly what is
//! missing. [`Order`] is the validated form with every field present.

use crate::store::{AttributeValue, Item};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt::Display;

/// Attribute that keys every stored order.
pub const KEY_ATTRIBUTE: &str = "orderId";

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// An order message decoded from JSON. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMessage {
    pub order_id: Option<String>,
    pub user_id: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<Number>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
}

/// An order that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: String,
    pub item_name: String,
    pub quantity: Number,
    pub status: String,
    pub timestamp: String,
}

impl Order {
    /// Builds the stored item, stamping `createdAt` with `created_at`.
    pub fn to_item(&self, created_at: DateTime<Utc>) -> Item {
        Item::new()
            .with(KEY_ATTRIBUTE, AttributeValue::S(self.order_id.0.clone()))
            .with("userId", AttributeValue::S(self.user_id.clone()))
            .with("itemName", AttributeValue::S(self.item_name.clone()))
            .with("quantity", AttributeValue::N(decimal_string(&self.quantity)))
            .with("status", AttributeValue::S(self.status.clone()))
            .with("timestamp", AttributeValue::S(self.timestamp.clone()))
            .with("createdAt", AttributeValue::S(iso_timestamp(created_at)))
    }
}

/// Shortest decimal form of a JSON number: `2.0` becomes `2`, `2.5` stays.
pub fn decimal_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Short label for a JSON value's type, used in log lines and errors.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
