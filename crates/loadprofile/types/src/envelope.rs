//! The envelope — the immutable result of one calculation pass.
//!
//! Computed once per wizard submission, handed to telemetry and pricing,
//! then discarded. Never updated in place.

use crate::event::{PolicyEvent, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named portion of total peak demand attributable to one equipment or
/// usage category. Contributor kilowatts always sum to the total peak within
/// floating tolerance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadContributor {
    pub label: String,
    pub kw: f64,
    /// Fraction of total peak in [0, 1]
    pub share: f64,
}

/// How much of the result rests on user-supplied data vs. defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// No essential or standard field was defaulted
    High,
    /// Only standard-tier defaults, and few of them
    Standard,
    /// Essential defaults present, or heavy reliance on defaults
    Fallback,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Standard => write!(f, "standard"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Aggregated view of the policy-event log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub total: usize,
    /// Per-code counts, ordered for deterministic serialization
    pub counts: BTreeMap<String, usize>,
    /// Highest severity present, `None` when the log is empty
    pub max_severity: Option<Severity>,
}

impl EventSummary {
    pub fn from_events(events: &[PolicyEvent]) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for event in events {
            *counts.entry(event.code.clone()).or_insert(0) += 1;
        }
        Self {
            total: events.len(),
            counts,
            max_severity: events.iter().map(|e| e.severity).max(),
        }
    }
}

/// The computed load envelope for one facility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub industry: String,
    pub peak_kw: f64,
    pub avg_kw: f64,
    /// Average over peak, in [0, 1]; 0 when peak is 0
    pub duty_cycle: f64,
    pub energy_kwh_per_day: f64,
    /// Backup duration sizing hint: industry default scaled by the
    /// sub-industry backup multiplier
    pub recommended_backup_hours: f64,
    pub confidence: Confidence,
    pub invariants_all_passed: bool,
    pub failed_invariant_keys: Vec<String>,
    pub contributors: Vec<LoadContributor>,
    pub policy_events: Vec<PolicyEvent>,
    pub event_summary: EventSummary,
    /// Content hash over industry, rounded numbers, and confidence.
    /// Identical inputs produce identical signatures, de-duplicating
    /// telemetry rows without caller-managed idempotency keys.
    pub signature: String,
}
