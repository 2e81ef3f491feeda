use crate::config::IngestConfig;
use crate::model::KEY_ATTRIBUTE;
use crate::pipeline::OrderPipeline;
use crate::store::{TableActor, TableClient};
use tracing::{error, info};

/// Runs the ingestion pipeline against the in-process table store.
///
/// `IngestSystem` is responsible for:
/// - **Store lifecycle**: spawning the [`TableActor`] task and stopping it
/// - **Dependency wiring**: handing a [`TableClient`] to the [`OrderPipeline`]
///
/// The pipeline never owns the store's lifecycle; this type does.
///
/// # Example
///
/// ```ignore
/// let system = IngestSystem::new(&IngestConfig::default());
///
/// let response = system.pipeline.handle(&event).await?;
/// let saved = system.table.get_item("Orders", "o1").await?;
///
/// system.shutdown().await?;
/// ```
pub struct IngestSystem {
    /// Pipeline writing into the in-process store.
    pub pipeline: OrderPipeline<TableClient>,

    /// Direct handle to the store, for reads.
    pub table: TableClient,

    handle: tokio::task::JoinHandle<()>,
}

impl IngestSystem {
    /// Spawns the table store and builds the pipeline on top of it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &IngestConfig) -> Self {
        let (actor, table) = TableActor::new(config.store_buffer, KEY_ATTRIBUTE);
        let handle = tokio::spawn(actor.run());

        info!(
            table = %config.table,
            on_persist_error = %config.on_persist_error,
            "Ingest system started"
        );

        Self {
            pipeline: OrderPipeline::new(table.clone(), config),
            table,
            handle,
        }
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping the pipeline and the table handle closes the request channel;
    /// the actor drains what is queued and exits.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the store task finished cleanly
    /// - `Err(String)` if it panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down ingest system...");

        drop(self.pipeline);
        drop(self.table);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Ingest system shutdown complete.");
        Ok(())
    }
}
