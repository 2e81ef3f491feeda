//! # Store Errors
//!
//! Errors shared by every [`OrderStore`](crate::store::OrderStore) backend.

/// Errors that can occur while writing to or reading from a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Item is missing key attribute `{0}`")]
    MissingKey(String),
    #[error("Write rejected: {0}")]
    Rejected(String),
    #[error("Backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}
