//! Error types for the ingestion pipeline.
//!
//! Only [`IngestError`] ever reaches the invocation boundary. The other kinds
//! describe why a single record or message was dropped and are logged, not
//! returned.

use crate::model::OrderId;
use crate::store::StoreError;
use thiserror::Error;

/// Why a delivery record produced no message.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The record has no string `body`.
    #[error("record has no string body")]
    MissingBody,

    /// The body is not valid JSON.
    #[error("record body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The body decoded to JSON `null`, which carries no message.
    #[error("record body is null")]
    NullBody,

    /// The forwarded `Message` string is not valid JSON.
    #[error("forwarded Message is not valid JSON: {0}")]
    InvalidForwardedMessage(#[source] serde_json::Error),
}

/// Why a normalized message was not persisted.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The message is not a JSON object.
    #[error("message is a JSON {0}, not an object")]
    NotAnObject(&'static str),

    /// A field has the wrong JSON type.
    #[error("malformed order message: {0}")]
    Malformed(#[source] serde_json::Error),

    /// One or more required fields are absent, null, or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Errors that end an invocation.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The invocation input is not a JSON object.
    #[error("invocation input must be a JSON object, got {0}")]
    InvalidInput(&'static str),

    /// A write failed under the `fail-batch` policy.
    #[error("failed to persist order {order_id}: {source}")]
    Persist {
        order_id: OrderId,
        #[source]
        source: StoreError,
    },

    /// The response body could not be encoded.
    #[error("failed to encode response: {0}")]
    Response(#[from] serde_json::Error),
}
