#![deny(unsafe_code)]
//! # loadprofile-telemetry
//!
//! The analytics edge of the calculator: a flattened, append-only record of
//! each computed envelope, and a fire-and-forget writer.
//!
//! Telemetry must never block or fail the primary response path: a failed
//! write is logged and discarded, never retried synchronously.

pub mod record;
pub mod sink;

pub use record::{EnvelopeRecord, TopContributor, TOP_CONTRIBUTOR_CAP};
pub use sink::{spawn_record, MemorySink, TelemetryError, TelemetrySink};
