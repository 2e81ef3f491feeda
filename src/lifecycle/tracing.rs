//! # Logging
//!
//! [`setup_tracing`] installs the global `tracing` subscriber once per process.
//!
//! - **Filtering** comes from `RUST_LOG` and falls back to `info`.
//! - **Compact** format (default) hides module paths and shows spans inline,
//!   e.g. `invocation: Order saved successfully order_id=o1`.
//! - **JSON** format writes one object per line, which log collectors in the
//!   hosted runtime index without extra parsing.
//!
//! ```bash
//! # Per-message detail, including the full received event
//! RUST_LOG=debug cargo run -- event.json
//!
//! # Machine-readable lines
//! LOG_FORMAT=json cargo run -- event.json
//! ```
//!
//! What gets logged:
//!
//! | Event | Level |
//! |-------|-------|
//! | Received event, parsed message | debug |
//! | Skipped record, rejected message | warn |
//! | Store error (with `order_id`) | error |
//! | Order saved, batch summary | info |

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().with_current_span(true).init(),
    }
}
