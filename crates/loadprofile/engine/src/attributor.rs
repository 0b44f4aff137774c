//! Contributor attributor — decomposes peak demand into named contributors.
//!
//! The residual base load plus every activated rule contribution must sum to
//! the total peak within 0.01 kW; a divergence means the calculator and the
//! attributor disagree about the arithmetic, which is a programming defect
//! and raises rather than being swallowed.

use crate::calculator::RawEnvelope;
use loadprofile_types::{EnvelopeError, LoadContributor};

/// Default cap on the emitted contributor list, including the synthetic
/// `"other"` entry.
pub const DEFAULT_TOP_CONTRIBUTORS: usize = 8;

/// Label for the residual base load contributor.
pub const BASE_LOAD_LABEL: &str = "base load";

/// Label for the collapsed remainder beyond the top-N cut.
pub const OTHER_LABEL: &str = "other";

pub fn attribute(raw: &RawEnvelope, top_n: usize) -> Result<Vec<LoadContributor>, EnvelopeError> {
    let mut contributors: Vec<LoadContributor> = Vec::new();
    if raw.base_load_kw > 0.0 {
        contributors.push(LoadContributor {
            label: BASE_LOAD_LABEL.to_string(),
            kw: raw.base_load_kw,
            share: 0.0,
        });
    }
    for (label, kw) in &raw.rule_contributions {
        contributors.push(LoadContributor {
            label: label.clone(),
            kw: *kw,
            share: 0.0,
        });
    }

    let sum: f64 = contributors.iter().map(|c| c.kw).sum();
    if (sum - raw.peak_kw).abs() > 0.01 {
        return Err(EnvelopeError::ContributorSumMismatch {
            peak_kw: raw.peak_kw,
            contributor_sum_kw: sum,
        });
    }

    contributors.sort_by(|a, b| b.kw.total_cmp(&a.kw));

    let top_n = top_n.max(1);
    if contributors.len() > top_n {
        let rest = contributors.split_off(top_n - 1);
        contributors.push(LoadContributor {
            label: OTHER_LABEL.to_string(),
            kw: rest.iter().map(|c| c.kw).sum(),
            share: 0.0,
        });
    }

    for contributor in &mut contributors {
        contributor.share = if raw.peak_kw > 0.0 {
            contributor.kw / raw.peak_kw
        } else {
            0.0
        };
    }

    Ok(contributors)
}
