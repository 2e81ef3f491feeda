//! The order ingestion pipeline: normalize, validate, persist, respond.
//!
//! One invocation is one sequential pass. Messages are handled one at a time
//! and at most one store write is in flight. A bad record or message is logged
//! and dropped; only the input shape and, under
//! [`PersistErrorPolicy::FailBatch`], a failed write end the invocation early.

pub mod envelope;
pub mod error;
pub mod validation;
pub mod writer;

pub use envelope::{normalize, Invocation, Normalized, SkippedRecord};
pub use error::*;
pub use validation::{decode, validate};
pub use writer::{Clock, PersistenceWriter};

use crate::config::{IngestConfig, PersistErrorPolicy};
use crate::model::{InvocationResponse, OrderId, ResponseBody, PROCESSED_MESSAGE};
use crate::store::OrderStore;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// Per-invocation tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Messages produced by normalization. This is the `count` reported back.
    pub normalized: usize,
    /// Records dropped because their body could not be decoded.
    pub skipped_records: usize,
    /// Messages dropped by decoding or validation.
    pub rejected: usize,
    pub persisted: usize,
    /// Orders whose write failed.
    pub failed: Vec<OrderId>,
}

/// Batch processor with an injected store.
///
/// The pipeline never creates or tears down the store; the hosting process
/// owns it and hands it in once.
pub struct OrderPipeline<S: OrderStore> {
    writer: PersistenceWriter<S>,
    on_persist_error: PersistErrorPolicy,
    report_persisted_count: bool,
}

impl<S: OrderStore> OrderPipeline<S> {
    pub fn new(store: S, config: &IngestConfig) -> Self {
        Self::with_writer(PersistenceWriter::new(store, config.table.clone()), config)
    }

    /// Builds a pipeline around an already configured writer.
    pub fn with_writer(writer: PersistenceWriter<S>, config: &IngestConfig) -> Self {
        Self {
            writer,
            on_persist_error: config.on_persist_error,
            report_persisted_count: config.report_persisted_count,
        }
    }

    pub fn writer(&self) -> &PersistenceWriter<S> {
        &self.writer
    }

    /// Handles one invocation and shapes the response.
    ///
    /// Always `200` when the batch completes, even if some messages were
    /// dropped or failed to persist.
    #[instrument(name = "invocation", skip_all)]
    pub async fn handle(&self, event: &Value) -> Result<InvocationResponse, IngestError> {
        debug!(
            event = %serde_json::to_string_pretty(event).unwrap_or_default(),
            "Received event"
        );
        let report = self.process(event).await?;
        let body = ResponseBody {
            message: PROCESSED_MESSAGE.to_owned(),
            count: report.normalized,
            persisted_count: self.report_persisted_count.then_some(report.persisted),
        };
        Ok(InvocationResponse::ok(&body)?)
    }

    /// Runs the batch and returns the tally without shaping a response.
    pub async fn process(&self, event: &Value) -> Result<BatchReport, IngestError> {
        let normalized = normalize(event)?;
        let mut report = BatchReport {
            normalized: normalized.messages.len(),
            skipped_records: normalized.skipped.len(),
            ..BatchReport::default()
        };

        for raw in &normalized.messages {
            debug!(message = %raw, "Parsed order message");

            let order = match decode(raw).and_then(validate) {
                Ok(order) => order,
                Err(e) => {
                    warn!(message = %raw, error = %e, "Rejected order message");
                    report.rejected += 1;
                    continue;
                }
            };

            match self.writer.write(&order).await {
                Ok(()) => report.persisted += 1,
                Err(source) => {
                    error!(order_id = %order.order_id, error = %source, "Store error for order");
                    match self.on_persist_error {
                        PersistErrorPolicy::Continue => report.failed.push(order.order_id),
                        PersistErrorPolicy::FailBatch => {
                            return Err(IngestError::Persist {
                                order_id: order.order_id,
                                source,
                            });
                        }
                    }
                }
            }
        }

        info!(
            normalized = report.normalized,
            skipped_records = report.skipped_records,
            rejected = report.rejected,
            persisted = report.persisted,
            failed = report.failed.len(),
            "Batch processed"
        );
        Ok(report)
    }
}
