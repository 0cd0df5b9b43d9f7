//! # Fetch Log
//!
//! Every fetch step reports its outcome through a [`FetchLogger`]. The logger is
//! the only place results go: callers that launch fetch steps do not collect
//! their output. Production code uses [`TracingLogger`]; tests use
//! [`MemoryLogger`](crate::mock::MemoryLogger) to count and inspect entries.

use crate::error::FetchError;
use tracing::{debug, error, info};

/// Outcome of one fetch step.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The step succeeded. `payload` is the `Debug` rendering of the records.
    Fetched { records: usize, payload: String },
    Failed(FetchError),
}

/// One structured log record, emitted exactly once per fetch step.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub entity_set: &'static str,
    pub url: String,
    pub outcome: Outcome,
}

impl LogEntry {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

/// Sink for fetch step outcomes. Shared by all concurrently running branches.
pub trait FetchLogger: Send + Sync {
    fn record(&self, entry: LogEntry);
}

/// Writes entries to the `tracing` subscriber: successes at `info`, with the
/// full payload at `debug`, failures at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl FetchLogger for TracingLogger {
    fn record(&self, entry: LogEntry) {
        let LogEntry {
            entity_set,
            url,
            outcome,
        } = entry;
        match outcome {
            Outcome::Fetched { records, payload } => {
                info!(entity_set, %url, records, "Fetched");
                debug!(entity_set, %payload, "Payload");
            }
            Outcome::Failed(e) => {
                error!(entity_set, %url, error = %e, "Fetch failed");
            }
        }
    }
}
