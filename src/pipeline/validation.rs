//! Field validation for normalized messages.

use crate::model::{json_kind, Order, OrderId, OrderMessage};
use crate::pipeline::MessageError;
use serde::Deserialize;
use serde_json::Value;

/// Decodes a raw message into the typed wire shape.
///
/// This only checks JSON types. Absent fields are fine here and are reported
/// by [`validate`].
pub fn decode(raw: &Value) -> Result<OrderMessage, MessageError> {
    if !raw.is_object() {
        return Err(MessageError::NotAnObject(json_kind(raw)));
    }
    OrderMessage::deserialize(raw).map_err(MessageError::Malformed)
}

/// Checks every required field and builds the validated [`Order`].
///
/// String fields must be present and non-empty. `quantity` only has to be
/// present: zero and negative values pass.
pub fn validate(message: OrderMessage) -> Result<Order, MessageError> {
    let mut missing = Vec::new();

    let order_id = required_text(message.order_id, "orderId", &mut missing);
    let user_id = required_text(message.user_id, "userId", &mut missing);
    let item_name = required_text(message.item_name, "itemName", &mut missing);
    if message.quantity.is_none() {
        missing.push("quantity");
    }
    let status = required_text(message.status, "status", &mut missing);
    let timestamp = required_text(message.timestamp, "timestamp", &mut missing);

    match (order_id, user_id, item_name, message.quantity, status, timestamp) {
        (
            Some(order_id),
            Some(user_id),
            Some(item_name),
            Some(quantity),
            Some(status),
            Some(timestamp),
        ) => Ok(Order {
            order_id: OrderId(order_id),
            user_id,
            item_name,
            quantity,
            status,
            timestamp,
        }),
        _ => Err(MessageError::MissingFields(missing)),
    }
}

fn required_text(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            missing.push(name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "orderId": "o1",
            "userId": "u1",
            "itemName": "Widget",
            "quantity": 2,
            "status": "NEW",
            "timestamp": "2024-01-01T00:00:00Z"
        })
    }

    fn check(raw: Value) -> Result<Order, MessageError> {
        decode(&raw).and_then(validate)
    }

    #[test]
    fn complete_message_passes() {
        let order = check(complete()).unwrap();
        assert_eq!(order.order_id, OrderId::from("o1"));
        assert_eq!(order.item_name, "Widget");
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in ["orderId", "userId", "itemName", "quantity", "status", "timestamp"] {
            let mut raw = complete();
            raw.as_object_mut().unwrap().remove(field);

            match check(raw) {
                Err(MessageError::MissingFields(missing)) => assert_eq!(missing, vec![field]),
                other => panic!("{field}: expected MissingFields, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_and_null_strings_are_missing() {
        let mut raw = complete();
        raw["userId"] = json!("");
        raw["status"] = Value::Null;

        let err = check(raw).unwrap_err();
        assert!(matches!(err, MessageError::MissingFields(ref m) if m == &["userId", "status"]));
    }

    #[test]
    fn zero_and_negative_quantity_pass() {
        for quantity in [json!(0), json!(-5), json!(0.0)] {
            let mut raw = complete();
            raw["quantity"] = quantity;
            assert!(check(raw).is_ok());
        }
    }

    #[test]
    fn null_quantity_fails() {
        let mut raw = complete();
        raw["quantity"] = Value::Null;
        let err = check(raw).unwrap_err();
        assert!(matches!(err, MessageError::MissingFields(ref m) if m == &["quantity"]));
    }

    #[test]
    fn wrong_types_are_malformed_not_missing() {
        let mut raw = complete();
        raw["quantity"] = json!("two");
        assert!(matches!(check(raw), Err(MessageError::Malformed(_))));

        assert!(matches!(
            check(json!([1, 2, 3])),
            Err(MessageError::NotAnObject("array"))
        ));
    }

    #[test]
    fn empty_object_reports_every_field() {
        let err = check(json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: orderId, userId, itemName, quantity, status, timestamp"
        );
    }
}
