//! Process lifecycle: starting the store, wiring the pipeline, shutting down.
//!
//! # Main Components
//!
//! - [`IngestSystem`] - Owns the in-process store task and the pipeline that writes to it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod ingest_system;
pub mod tracing;

pub use ingest_system::*;
pub use self::tracing::*;
