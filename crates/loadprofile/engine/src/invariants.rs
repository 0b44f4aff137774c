//! Invariant validator — physical/logical consistency checks over the
//! assembled raw envelope and contributors.
//!
//! A failing invariant never aborts the calculation: the envelope is still
//! returned with `invariants_all_passed = false` and the failing keys listed,
//! and each failure emits an `error`-severity event so telemetry sees it.

use crate::calculator::RawEnvelope;
use loadprofile_types::{codes, EventLog, LoadContributor, PolicyEvent, Severity};

pub const PEAK_NONNEGATIVE: &str = "peak_nonnegative";
pub const AVG_LE_PEAK: &str = "avg_le_peak";
pub const DUTY_CYCLE_BOUNDS: &str = "duty_cycle_bounds";
pub const ENERGY_CONSISTENCY: &str = "energy_consistency";
pub const CONTRIBUTOR_SUM_MATCHES_PEAK: &str = "contributor_sum_matches_peak";

const KW_TOLERANCE: f64 = 0.01;
const ENERGY_RELATIVE_TOLERANCE: f64 = 0.05;

/// Outcome of the fixed, named check set.
#[derive(Clone, Debug, Default)]
pub struct InvariantReport {
    pub all_passed: bool,
    pub failed_keys: Vec<String>,
}

pub fn validate(
    raw: &RawEnvelope,
    contributors: &[LoadContributor],
    log: &mut EventLog,
) -> InvariantReport {
    let contributor_sum: f64 = contributors.iter().map(|c| c.kw).sum();
    let expected_energy = raw.avg_kw * raw.operating_hours;

    let checks: [(&str, bool); 5] = [
        (PEAK_NONNEGATIVE, raw.peak_kw >= 0.0),
        (AVG_LE_PEAK, raw.avg_kw <= raw.peak_kw + KW_TOLERANCE),
        (
            DUTY_CYCLE_BOUNDS,
            (0.0..=1.0).contains(&raw.duty_cycle),
        ),
        (
            // Checked against the normalized operating hours, not a
            // hardcoded 24: shorter days are intentional.
            ENERGY_CONSISTENCY,
            (raw.energy_kwh_per_day - expected_energy).abs()
                <= expected_energy * ENERGY_RELATIVE_TOLERANCE + f64::EPSILON,
        ),
        (
            CONTRIBUTOR_SUM_MATCHES_PEAK,
            (contributor_sum - raw.peak_kw).abs() <= KW_TOLERANCE,
        ),
    ];

    let mut failed_keys = Vec::new();
    for (key, passed) in checks {
        if !passed {
            tracing::error!(key, "envelope invariant failed");
            log.push(
                PolicyEvent::new(codes::INVARIANT_FAILED, Severity::Error)
                    .with("key", key)
                    .with("peak_kw", format!("{:.3}", raw.peak_kw))
                    .with("avg_kw", format!("{:.3}", raw.avg_kw)),
            );
            failed_keys.push(key.to_string());
        }
    }

    InvariantReport {
        all_passed: failed_keys.is_empty(),
        failed_keys,
    }
}
