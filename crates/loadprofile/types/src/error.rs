use thiserror::Error;

/// Errors from the envelope calculator.
///
/// The taxonomy matters to callers: configuration defects mean the reference
/// data itself is broken and must propagate unrecoverably; a missing required
/// input is fatal to the request but recoverable by re-prompting the user.
/// Input irregularities never appear here — they are resolved via clamping or
/// defaulting plus a policy event.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    // --- Caller-recoverable ---
    #[error("missing required input: {field_name}")]
    MissingRequiredInput { field_name: String },

    // --- Configuration defects ---
    #[error("required calculation constant absent from reference store: {key}")]
    InvalidConstantLookup { key: String },

    #[error("no industry profile for slug {industry}")]
    UnknownIndustry { industry: String },

    #[error("business-size tier bands for {industry} are malformed: {message}")]
    MalformedTierBands { industry: String, message: String },

    #[error("catalog for {industry} does not declare its primary size field {field_name}")]
    MalformedCatalog {
        industry: String,
        field_name: String,
    },

    // --- Programming defects ---
    #[error(
        "contributor sum {contributor_sum_kw:.3} kW diverges from peak {peak_kw:.3} kW beyond tolerance"
    )]
    ContributorSumMismatch {
        peak_kw: f64,
        contributor_sum_kw: f64,
    },
}

impl EnvelopeError {
    /// Whether the error indicates broken reference data rather than a bad
    /// request. Configuration defects should page an operator, not re-prompt
    /// the user.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Self::InvalidConstantLookup { .. }
                | Self::UnknownIndustry { .. }
                | Self::MalformedTierBands { .. }
                | Self::MalformedCatalog { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_predicates() {
        let missing = EnvelopeError::MissingRequiredInput {
            field_name: "room_count".into(),
        };
        assert!(!missing.is_configuration_defect());

        let constant = EnvelopeError::InvalidConstantLookup {
            key: "hotel.load_factor".into(),
        };
        assert!(constant.is_configuration_defect());
    }

    #[test]
    fn error_display() {
        let err = EnvelopeError::MissingRequiredInput {
            field_name: "bay_count".into(),
        };
        assert!(err.to_string().contains("bay_count"));

        let err = EnvelopeError::InvalidConstantLookup {
            key: "sizing.tier_load_multiplier.small".into(),
        };
        assert!(err.to_string().contains("sizing.tier_load_multiplier.small"));
    }
}
