//! # Order Ingest
//!
//! > **Queue-delivered order events into a key-value store.**
//!
//! Each invocation receives either a batch of delivery records or a single
//! order object. The pipeline flattens the batch (unwrapping one level of
//! topic-forwarding envelope), decodes and validates every order, and writes
//! each valid one as an item stamped with `createdAt`.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Pipeline ([`pipeline`])
//! Envelope normalization, validation, persistence, and response shaping.
//! - **Key items**: [`OrderPipeline`](pipeline::OrderPipeline), [`normalize`](pipeline::normalize),
//!   [`validate`](pipeline::validate), [`PersistenceWriter`](pipeline::PersistenceWriter).
//!
//! ### 2. The Store ([`store`])
//! The [`OrderStore`](store::OrderStore) trait the pipeline writes through, an
//! in-process [`TableActor`](store::TableActor), a [`MockStore`](store::mock::MockStore)
//! for tests, and a DynamoDB backend behind the `lambda` feature.
//!
//! ### 3. The Data ([`model`])
//! Order wire shape, validated order, and invocation response.
//!
//! ### 4. The Host ([`lifecycle`], [`config`])
//! Environment configuration, logging setup, and [`IngestSystem`](lifecycle::IngestSystem),
//! which owns the store task.
//!
//! ## Error Handling
//!
//! Per-record and per-message problems are logged and skipped; they never fail
//! the batch. Only a non-object input, or a store error under the
//! `fail-batch` policy, ends an invocation with an error.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! echo '{"orderId":"o3","userId":"u3","itemName":"Gadget","quantity":1,"status":"NEW","timestamp":"t"}' \
//!   | RUST_LOG=info cargo run
//! ```

pub mod config;
pub mod lifecycle;
pub mod model;
pub mod pipeline;
pub mod store;
