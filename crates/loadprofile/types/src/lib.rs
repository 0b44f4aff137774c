#![deny(unsafe_code)]
//! # loadprofile-types
//!
//! Core data model for the load-profile envelope calculator.
//!
//! The calculator turns a partially-filled questionnaire response into a
//! normalized, explainable electrical load envelope. This crate holds the
//! value objects shared by every stage of that pipeline:
//!
//! ```text
//! QuestionAnswer → NormalizedInput → Envelope
//!                        │
//!                   PolicyEvent (append-only log)
//! ```
//!
//! ## Key Types
//!
//! - [`QuestionAnswer`] / [`NormalizedInput`] — raw and typed questionnaire data
//! - [`QuestionCatalog`] — the declaring industry's field catalog
//! - [`PolicyEvent`] / [`EventLog`] — structured record of every degraded decision
//! - [`Envelope`] — the immutable calculation result
//! - [`EnvelopeError`] — the error taxonomy (configuration defects vs. missing input)

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod event;
pub mod input;
pub mod value;

pub use catalog::{FieldType, QuestionCatalog, QuestionSpec};
pub use envelope::{Confidence, Envelope, EventSummary, LoadContributor};
pub use error::EnvelopeError;
pub use event::{codes, EventLog, PolicyEvent, Severity};
pub use input::{NormalizedInput, NormalizedValue, QuestionAnswer};
pub use value::{Provenance, QuestionTier, TypedValue};
