//! Local runner: one invocation event in, one response out.
//!
//! Reads the event JSON from the file given as the first argument, or from
//! stdin when there is none, runs it through the pipeline against the
//! in-process store, and prints the response JSON to stdout.

use order_ingest::config::IngestConfig;
use order_ingest::lifecycle::{setup_tracing, IngestSystem};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

async fn read_event() -> Result<Value, String> {
    let raw = match std::env::args().nth(1) {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("failed to read {path}: {e}"))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            raw
        }
    };
    serde_json::from_str(&raw).map_err(|e| format!("event is not valid JSON: {e}"))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = IngestConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing(config.log_format);

    let event = read_event().await?;
    let system = IngestSystem::new(&config);

    let outcome = system.pipeline.handle(&event).await;
    let stored = system.table.len(&config.table).await.map_err(|e| e.to_string())?;
    system.shutdown().await?;

    match outcome {
        Ok(response) => {
            info!(stored, "Invocation complete");
            let json = serde_json::to_string(&response).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Invocation failed");
            Err(e.to_string())
        }
    }
}
