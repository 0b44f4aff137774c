//! Telemetry sinks.
//!
//! The write path is fire-and-forget: [`spawn_record`] hands the row to a
//! background task and returns immediately. A failed write is logged at
//! `warn` and discarded — it never fails the calculation and is never
//! retried synchronously.

use crate::record::EnvelopeRecord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("telemetry write failed: {0}")]
    WriteFailed(String),
}

/// Append-only telemetry destination.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn record(&self, record: EnvelopeRecord) -> Result<(), TelemetryError>;
}

/// Hand the record to the sink without blocking the caller.
pub fn spawn_record(sink: Arc<dyn TelemetrySink>, record: EnvelopeRecord) {
    let trace_id = record.trace_id;
    tokio::spawn(async move {
        if let Err(err) = sink.record(record).await {
            tracing::warn!(%trace_id, %err, "telemetry write failed, discarding row");
        }
    });
}

/// In-memory sink for tests and local runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Mutex<Vec<EnvelopeRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<EnvelopeRecord> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl TelemetrySink for MemorySink {
    async fn record(&self, record: EnvelopeRecord) -> Result<(), TelemetryError> {
        self.rows.lock().await.push(record);
        Ok(())
    }
}
