#![deny(unsafe_code)]
//! # loadprofile-engine
//!
//! The envelope calculation pipeline: a pure, synchronous, single-request
//! computation that turns one questionnaire submission into an immutable
//! [`Envelope`](loadprofile_types::Envelope).
//!
//! ```text
//! Normalizer → Resolver → Calculator → Attributor → Confidence
//!                                                        │
//!                     Invariant Validator → Assembler ←──┘
//! ```
//!
//! Each stage is a pure function over the previous stage's output plus
//! read-only reference data; the only accumulator is the append-only policy
//! event log threaded through the pipeline. No stage performs I/O and no
//! stage mutates shared state, so any number of calculations may run
//! concurrently over one reference snapshot.
//!
//! Entry point: [`EnvelopeCalculator::calculate`].

pub mod assembler;
pub mod attributor;
pub mod calculator;
pub mod confidence;
pub mod invariants;
pub mod normalizer;
pub mod pipeline;
pub mod resolver;

pub use attributor::DEFAULT_TOP_CONTRIBUTORS;
pub use calculator::RawEnvelope;
pub use invariants::InvariantReport;
pub use pipeline::{EnvelopeCalculator, EnvelopeRequest};
pub use resolver::ResolvedContext;
