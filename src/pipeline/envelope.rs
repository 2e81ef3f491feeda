//! Envelope normalization: turns one invocation input into an ordered list of
//! raw messages.
//!
//! Two input shapes are accepted:
//!
//! - **Batch**: `{ "Records": [ { "body": "<json>" }, ... ] }`. Each body is
//!   decoded; if it is a forwarding envelope (an object with a string
//!   `Message`), that string is decoded once more and used instead.
//! - **Direct**: any other object is itself the single message.

use crate::model::json_kind;
use crate::pipeline::{EnvelopeError, IngestError};
use serde_json::Value;
use tracing::{debug, warn};

/// Field holding the batch records.
pub const RECORDS_FIELD: &str = "Records";
/// Field of a forwarding envelope holding the JSON-encoded message.
pub const FORWARDED_MESSAGE_FIELD: &str = "Message";

/// How the invocation input was delivered.
#[derive(Debug, Clone, Copy)]
pub enum Invocation<'a> {
    Batch(&'a [Value]),
    Direct(&'a Value),
}

impl<'a> Invocation<'a> {
    /// Classifies `event`. Anything other than a JSON object is rejected.
    ///
    /// A `Records` field that is not an array does not make a batch; the whole
    /// object is then treated as a direct message.
    pub fn classify(event: &'a Value) -> Result<Self, IngestError> {
        let Value::Object(fields) = event else {
            return Err(IngestError::InvalidInput(json_kind(event)));
        };
        match fields.get(RECORDS_FIELD) {
            Some(Value::Array(records)) => Ok(Invocation::Batch(records)),
            _ => Ok(Invocation::Direct(event)),
        }
    }
}

/// A record that was dropped during normalization.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Position of the record in the batch.
    pub index: usize,
    /// Delivery id of the record, when the transport supplied one.
    pub message_id: Option<String>,
    pub error: EnvelopeError,
}

/// Output of [`normalize`].
#[derive(Debug, Default)]
pub struct Normalized {
    /// Raw messages in record order.
    pub messages: Vec<Value>,
    pub skipped: Vec<SkippedRecord>,
}

/// Flattens `event` into its raw messages.
///
/// Malformed records are logged and skipped; they never abort the batch and
/// leave no placeholder in the output.
pub fn normalize(event: &Value) -> Result<Normalized, IngestError> {
    let mut normalized = Normalized::default();

    match Invocation::classify(event)? {
        Invocation::Direct(message) => {
            debug!("Direct invocation, treating input as a single message");
            normalized.messages.push(message.clone());
        }
        Invocation::Batch(records) => {
            debug!(records = records.len(), "Batch invocation");
            for (index, record) in records.iter().enumerate() {
                match unwrap_record(record) {
                    Ok(message) => normalized.messages.push(message),
                    Err(error) => {
                        let message_id = record
                            .get("messageId")
                            .and_then(Value::as_str)
                            .map(str::to_owned);
                        warn!(
                            index,
                            message_id = message_id.as_deref().unwrap_or("-"),
                            body = ?record.get("body"),
                            %error,
                            "Failed to parse record body, skipping"
                        );
                        normalized.skipped.push(SkippedRecord {
                            index,
                            message_id,
                            error,
                        });
                    }
                }
            }
        }
    }

    Ok(normalized)
}

/// Decodes one delivery record into its message.
pub fn unwrap_record(record: &Value) -> Result<Value, EnvelopeError> {
    let body = record
        .get("body")
        .and_then(Value::as_str)
        .ok_or(EnvelopeError::MissingBody)?;

    let envelope: Value = serde_json::from_str(body).map_err(EnvelopeError::InvalidBody)?;
    if envelope.is_null() {
        return Err(EnvelopeError::NullBody);
    }

    unwrap_forwarded(envelope)
}

/// Unwraps one level of forwarding envelope, if `envelope` is one.
///
/// Only a string-typed `Message` counts. The inner message is never inspected
/// for a further envelope.
pub fn unwrap_forwarded(envelope: Value) -> Result<Value, EnvelopeError> {
    match envelope.get(FORWARDED_MESSAGE_FIELD).and_then(Value::as_str) {
        Some(inner) => {
            serde_json::from_str(inner).map_err(EnvelopeError::InvalidForwardedMessage)
        }
        None => Ok(envelope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(body: &str) -> Value {
        json!({ "body": body })
    }

    #[test]
    fn batch_keeps_record_order() {
        let event = json!({
            "Records": [record(r#"{"orderId":"a"}"#), record(r#"{"orderId":"b"}"#)]
        });
        let out = normalize(&event).unwrap();

        assert_eq!(out.messages, vec![json!({"orderId":"a"}), json!({"orderId":"b"})]);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn malformed_bodies_are_skipped_wherever_they_are() {
        let event = json!({
            "Records": [
                record("not-json"),
                record(r#"{"orderId":"a"}"#),
                { "messageId": "m-3", "body": "{" },
                record(r#"{"orderId":"b"}"#),
                { "messageId": "m-5" }
            ]
        });
        let out = normalize(&event).unwrap();

        assert_eq!(out.messages.len(), 2);
        let skipped: Vec<usize> = out.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![0, 2, 4]);
        assert_eq!(out.skipped[1].message_id.as_deref(), Some("m-3"));
        assert!(matches!(out.skipped[2].error, EnvelopeError::MissingBody));
    }

    #[test]
    fn forwarding_envelope_is_unwrapped_once() {
        let inner = json!({ "Message": "{\"orderId\":\"deep\"}" }).to_string();
        let outer = json!({ "Message": inner, "TopicArn": "arn:orders" }).to_string();
        let out = normalize(&json!({ "Records": [record(&outer)] })).unwrap();

        // The inner value still looks like an envelope but is left as-is.
        assert_eq!(out.messages, vec![json!({ "Message": "{\"orderId\":\"deep\"}" })]);
    }

    #[test]
    fn non_string_message_field_is_not_an_envelope() {
        let body = json!({ "Message": { "orderId": "o1" }, "orderId": "o2" }).to_string();
        let out = normalize(&json!({ "Records": [record(&body)] })).unwrap();

        assert_eq!(out.messages[0]["orderId"], "o2");
    }

    #[test]
    fn bad_forwarded_message_skips_the_record() {
        let body = json!({ "Message": "not-json" }).to_string();
        let out = normalize(&json!({ "Records": [record(&body)] })).unwrap();

        assert!(out.messages.is_empty());
        assert!(matches!(
            out.skipped[0].error,
            EnvelopeError::InvalidForwardedMessage(_)
        ));
    }

    #[test]
    fn null_body_is_skipped() {
        let out = normalize(&json!({ "Records": [record("null")] })).unwrap();
        assert!(out.messages.is_empty());
        assert!(matches!(out.skipped[0].error, EnvelopeError::NullBody));
    }

    #[test]
    fn direct_input_is_a_batch_of_one() {
        let event = json!({ "orderId": "o3" });
        let out = normalize(&event).unwrap();
        assert_eq!(out.messages, vec![event]);
    }

    #[test]
    fn non_array_records_means_direct_input() {
        let event = json!({ "Records": "oops", "orderId": "o4" });
        let out = normalize(&event).unwrap();
        assert_eq!(out.messages, vec![event]);
    }

    #[test]
    fn non_object_input_is_fatal() {
        let err = normalize(&json!("hello")).unwrap_err();
        assert!(matches!(err, IngestError::InvalidInput("string")));
    }
}
