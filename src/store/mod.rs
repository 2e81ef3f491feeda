//! Key-value storage for persisted orders.
//!
//! The pipeline never talks to a concrete backend. It writes through the
//! [`OrderStore`] trait, and the hosting process decides which implementation
//! to inject.
//!
//! # Main Components
//!
//! - [`OrderStore`] - Trait every backend implements (a single-item upsert)
//! - [`Item`] / [`AttributeValue`] - Typed key-value item model
//! - [`TableActor`] / [`TableClient`] - In-process store running in its own Tokio task
//! - [`StoreError`] - Common error type for all backends
//!
//! # Testing
//!
//! See the [`mock`] module for an expectation-driven store that lets tests
//! inject write failures.

pub mod error;
pub mod item;
pub mod memory;
pub mod mock;

#[cfg(feature = "lambda")]
pub mod dynamo;

pub use error::*;
pub use item::*;
pub use memory::*;

use async_trait::async_trait;

/// A key-value store that accepts whole-item writes.
///
/// # Contract
/// - `put_item` is an unconditional upsert: an existing item with the same key
///   is replaced in full.
/// - One call issues exactly one write. Implementations do not retry.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Writes `item` into `table`.
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError>;
}
