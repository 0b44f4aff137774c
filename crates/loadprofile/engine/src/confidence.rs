//! Confidence assessor — scores how much of the result rests on defaults.
//!
//! A pure function over the provenance flags the normalizer collected; it
//! never re-inspects raw answers.

use loadprofile_types::{Confidence, NormalizedInput, QuestionTier};

/// Fraction of standard-tier fields that may be defaulted before the result
/// drops from `Standard` to `Fallback`.
const STANDARD_DEFAULT_BUDGET: f64 = 0.30;

pub fn assess(input: &NormalizedInput) -> Confidence {
    let essential_defaults = input.tier_count(QuestionTier::Essential, true);
    let standard_total = input.tier_count(QuestionTier::Standard, false);
    let standard_defaults = input.tier_count(QuestionTier::Standard, true);
    let detailed_defaults = input.tier_count(QuestionTier::Detailed, true);

    if essential_defaults == 0 && standard_defaults == 0 {
        return Confidence::High;
    }
    if essential_defaults == 0
        && detailed_defaults == 0
        && standard_total > 0
        && (standard_defaults as f64) <= STANDARD_DEFAULT_BUDGET * standard_total as f64
    {
        return Confidence::Standard;
    }
    Confidence::Fallback
}
