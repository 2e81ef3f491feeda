//! # Mock Store & Testing Guide
//!
//! [`MockStore`] implements [`OrderStore`] entirely in memory and answers each
//! write from a queue of expectations. It lets tests decide, write by write,
//! whether the backend accepts or rejects an item, which is hard to arrange
//! with a real store.
//!
//! ## When to use the Mock vs the Table Store
//!
//! | Feature | MockStore | TableActor |
//! |---------|-----------|------------|
//! | **State** | Records writes, no lookups | Real upsert semantics |
//! | **Error Injection** | Easy (`return_err`) | Only missing keys |
//! | **Use Case** | Persist-error policies | End-to-end scenarios |
//!
//! ## Example
//!
//! ```rust
//! use order_ingest::store::mock::MockStore;
//! use order_ingest::store::{AttributeValue, Item, OrderStore, StoreError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::new();
//!     mock.expect_put("o1").return_ok();
//!     mock.expect_put("o2").return_err(StoreError::Rejected("throttled".into()));
//!
//!     let o1 = Item::new().with("orderId", AttributeValue::S("o1".into()));
//!     let o2 = Item::new().with("orderId", AttributeValue::S("o2".into()));
//!     assert!(mock.put_item("Orders", o1).await.is_ok());
//!     assert!(mock.put_item("Orders", o2).await.is_err());
//!
//!     mock.verify();
//!     assert_eq!(mock.writes().len(), 2);
//! }
//! ```

use crate::store::{Item, OrderStore, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// An expected write and the response to give it.
struct Expectation {
    order_id: String,
    response: Result<(), StoreError>,
}

/// A write the mock has received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub table: String,
    pub item: Item,
}

/// A store with expectation tracking for fluent testing.
///
/// Cloning shares the same expectation queue and write log, so a test can keep
/// one handle for assertions and give another to the pipeline.
#[derive(Clone)]
pub struct MockStore {
    key_attribute: Arc<str>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    writes: Arc<Mutex<Vec<RecordedWrite>>>,
}

impl MockStore {
    /// Creates a mock keyed by `orderId` with no expectations.
    pub fn new() -> Self {
        Self::keyed_by("orderId")
    }

    pub fn keyed_by(key_attribute: &str) -> Self {
        Self {
            key_attribute: Arc::from(key_attribute),
            expectations: Arc::default(),
            writes: Arc::default(),
        }
    }

    /// Expects a write of the item keyed by `order_id`.
    pub fn expect_put(&mut self, order_id: impl Into<String>) -> PutExpectationBuilder {
        PutExpectationBuilder {
            order_id: order_id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every write received so far, in order.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl OrderStore for MockStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        let Some(expectation) = expectation else {
            panic!("Unexpected put_item into {table}: {item:?}");
        };

        let key = item.get_s(&self.key_attribute).unwrap_or_default();
        if key != expectation.order_id {
            panic!(
                "Expected put of `{}`, got `{}`",
                expectation.order_id, key
            );
        }

        self.writes.lock().unwrap().push(RecordedWrite {
            table: table.to_owned(),
            item,
        });
        expectation.response
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `put` expectations.
pub struct PutExpectationBuilder {
    order_id: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl PutExpectationBuilder {
    /// The write succeeds.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// The write fails with `error`.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), StoreError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            order_id: self.order_id,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AttributeValue;

    fn keyed(id: &str) -> Item {
        Item::new().with("orderId", AttributeValue::S(id.into()))
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockStore::new();
        mock.expect_put("o1").return_ok();
        mock.expect_put("o2").return_err(StoreError::Rejected("boom".into()));

        assert!(mock.put_item("Orders", keyed("o1")).await.is_ok());
        let err = mock.put_item("Orders", keyed("o2")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));

        mock.verify();
        let writes = mock.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].table, "Orders");
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_fails_on_unused_expectation() {
        let mut mock = MockStore::new();
        mock.expect_put("o1").return_ok();
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected put_item")]
    async fn test_unexpected_write_panics() {
        let mock = MockStore::new();
        let _ = mock.put_item("Orders", keyed("o1")).await;
    }
}
