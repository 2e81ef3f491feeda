//! Hosted entry point: serves invocations from the Lambda runtime API and
//! writes orders to DynamoDB.
//!
//! The DynamoDB client is built once per process and shared by every
//! invocation. A `fail-batch` store error is returned as the invocation error
//! so the queue redelivers the batch.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use order_ingest::config::IngestConfig;
use order_ingest::lifecycle::setup_tracing;
use order_ingest::model::InvocationResponse;
use order_ingest::pipeline::OrderPipeline;
use order_ingest::store::dynamo::DynamoStore;
use serde_json::Value;
use tracing::info;

async fn function_handler(
    pipeline: &OrderPipeline<DynamoStore>,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    info!(request_id = %event.context.request_id, "Invocation received");
    Ok(pipeline.handle(&event.payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = IngestConfig::from_env()?;
    setup_tracing(config.log_format);

    let store = DynamoStore::from_env().await;
    let pipeline = OrderPipeline::new(store, &config);
    info!(table = %config.table, on_persist_error = %config.on_persist_error, "Handler ready");

    let pipeline = &pipeline;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(pipeline, event).await
    }))
    .await
}
