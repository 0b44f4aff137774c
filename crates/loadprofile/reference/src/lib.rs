#![deny(unsafe_code)]
//! # loadprofile-reference
//!
//! Read-only reference data shared by all concurrent envelope calculations:
//! industry profiles, sub-industry multipliers, business-size tier bands,
//! namespaced calculation constants, and per-industry contributor rules.
//!
//! Reference data is loaded once per process lifetime into an immutable
//! [`ReferenceSnapshot`]. The hot read path takes no lock per lookup; a
//! reload swaps in a whole new snapshot atomically via [`SnapshotStore`],
//! so in-flight calculations always see a consistent version.
//!
//! Lookups return `Option` rather than erroring — the calculator decides
//! whether absence means "fail" or "default".

pub mod error;
pub mod model;
pub mod store;

pub use error::ReferenceError;
pub use model::{
    ActivationPredicate, CalculationConstant, ContributorRule, IndustryProfile, SizeTier,
    SizeTierBand, SubIndustryMultiplier,
};
pub use store::{ReferenceData, ReferenceSnapshot, ReferenceStore, SnapshotStore};
