//! Runtime configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ORDERS_TABLE | Orders | Table every order is written to |
//! | ON_PERSIST_ERROR | continue | `continue` or `fail-batch` |
//! | REPORT_PERSISTED_COUNT | false | Add `persistedCount` to the response body |
//! | STORE_BUFFER | 32 | Request buffer of the in-process table store |
//! | LOG_FORMAT | compact | `compact` or `json` |
//!
//! Unset variables take the default. A set but unparsable value is an error.
//!
//! ```bash
//! ON_PERSIST_ERROR=fail-batch ORDERS_TABLE=OrdersStaging cargo run -- event.json
//! ```

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Default target table.
pub const DEFAULT_TABLE: &str = "Orders";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// What to do when a store write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistErrorPolicy {
    /// Log the failure and move on to the next message.
    #[default]
    Continue,
    /// Stop the batch and return the error so the delivery system redelivers
    /// it (and eventually dead-letters it).
    FailBatch,
}

impl FromStr for PersistErrorPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "fail-batch" | "fail_batch" => Ok(Self::FailBatch),
            _ => Err(()),
        }
    }
}

impl Display for PersistErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Continue => "continue",
            Self::FailBatch => "fail-batch",
        })
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, spans inline.
    #[default]
    Compact,
    /// One JSON object per line, for log collectors.
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Configuration for one ingestion process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Table every order is written to.
    pub table: String,
    /// Reaction to a failed store write.
    pub on_persist_error: PersistErrorPolicy,
    /// Whether the response body also reports how many orders were saved.
    pub report_persisted_count: bool,
    /// Request buffer of the in-process table store.
    pub store_buffer: usize,
    pub log_format: LogFormat,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_owned(),
            on_persist_error: PersistErrorPolicy::Continue,
            report_persisted_count: false,
            store_buffer: 32,
            log_format: LogFormat::Compact,
        }
    }
}

impl IngestConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    ///
    /// Used by tests so they never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            table: lookup("ORDERS_TABLE")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(defaults.table),
            on_persist_error: parse_var(
                &lookup,
                "ON_PERSIST_ERROR",
                "`continue` or `fail-batch`",
                defaults.on_persist_error,
            )?,
            report_persisted_count: parse_var(
                &lookup,
                "REPORT_PERSISTED_COUNT",
                "`true` or `false`",
                defaults.report_persisted_count,
            )?,
            store_buffer: parse_var(
                &lookup,
                "STORE_BUFFER",
                "a positive integer",
                defaults.store_buffer,
            )?
            .max(1),
            log_format: parse_var(&lookup, "LOG_FORMAT", "`compact` or `json`", defaults.log_format)?,
        })
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_persist_error_policy(mut self, policy: PersistErrorPolicy) -> Self {
        self.on_persist_error = policy;
        self
    }

    pub fn with_persisted_count(mut self, report: bool) -> Self {
        self.report_persisted_count = report;
        self
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |k| vars.get(k).map(|v| v.to_string())
    }

    #[test]
    fn unset_environment_gives_defaults() {
        let config = IngestConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, IngestConfig::default());
        assert_eq!(config.table, "Orders");
        assert_eq!(config.on_persist_error, PersistErrorPolicy::Continue);
    }

    #[test]
    fn overrides_are_applied() {
        let config = IngestConfig::from_lookup(lookup(&[
            ("ORDERS_TABLE", "OrdersStaging"),
            ("ON_PERSIST_ERROR", "fail-batch"),
            ("REPORT_PERSISTED_COUNT", "true"),
            ("STORE_BUFFER", "0"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.table, "OrdersStaging");
        assert_eq!(config.on_persist_error, PersistErrorPolicy::FailBatch);
        assert!(config.report_persisted_count);
        assert_eq!(config.store_buffer, 1);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_policy_is_an_error_not_a_default() {
        let err = IngestConfig::from_lookup(lookup(&[("ON_PERSIST_ERROR", "retry")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value `retry` for ON_PERSIST_ERROR: expected `continue` or `fail-batch`"
        );
    }
}
