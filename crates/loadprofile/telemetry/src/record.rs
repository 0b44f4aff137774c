//! The flattened telemetry row for one computed envelope.

use chrono::{DateTime, Utc};
use loadprofile_types::{Confidence, Envelope, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fixed cap on the top-contributors array in a telemetry row.
pub const TOP_CONTRIBUTOR_CAP: usize = 5;

/// A contributor as stored in telemetry: label, kilowatts, share of peak.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopContributor {
    pub label: String,
    pub kw: f64,
    pub share: f64,
}

/// One append-only telemetry row.
///
/// The envelope's signature de-duplicates functionally identical
/// submissions; the trace id correlates the row with the caller's request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvelopeRecord {
    pub trace_id: Uuid,
    pub industry: String,
    /// Catalog/template identifiers, as versioned by the authoring system
    pub template_id: String,
    pub schema_version: String,

    pub peak_kw: f64,
    pub avg_kw: f64,
    pub duty_cycle: f64,
    pub energy_kwh_per_day: f64,
    pub recommended_backup_hours: f64,

    pub confidence: Confidence,
    pub invariants_all_passed: bool,
    pub failed_invariant_keys: Vec<String>,

    pub policy_event_total: usize,
    pub policy_event_counts: BTreeMap<String, usize>,
    pub max_severity: Option<Severity>,

    pub top_contributors: Vec<TopContributor>,
    pub signature: String,
    pub recorded_at: DateTime<Utc>,
}

impl EnvelopeRecord {
    /// Flatten an envelope into its telemetry row.
    pub fn from_envelope(
        trace_id: Uuid,
        template_id: impl Into<String>,
        schema_version: impl Into<String>,
        envelope: &Envelope,
    ) -> Self {
        Self {
            trace_id,
            industry: envelope.industry.clone(),
            template_id: template_id.into(),
            schema_version: schema_version.into(),
            peak_kw: envelope.peak_kw,
            avg_kw: envelope.avg_kw,
            duty_cycle: envelope.duty_cycle,
            energy_kwh_per_day: envelope.energy_kwh_per_day,
            recommended_backup_hours: envelope.recommended_backup_hours,
            confidence: envelope.confidence,
            invariants_all_passed: envelope.invariants_all_passed,
            failed_invariant_keys: envelope.failed_invariant_keys.clone(),
            policy_event_total: envelope.event_summary.total,
            policy_event_counts: envelope.event_summary.counts.clone(),
            max_severity: envelope.event_summary.max_severity,
            top_contributors: envelope
                .contributors
                .iter()
                .take(TOP_CONTRIBUTOR_CAP)
                .map(|c| TopContributor {
                    label: c.label.clone(),
                    kw: c.kw,
                    share: c.share,
                })
                .collect(),
            signature: envelope.signature.clone(),
            recorded_at: Utc::now(),
        }
    }
}
