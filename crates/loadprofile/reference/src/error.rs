use thiserror::Error;

/// Errors from reference-data loading and validation.
///
/// All of these are configuration defects: they indicate the reference data
/// itself is broken and must fail loudly at load time, before any request
/// can consume it.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("business-size tier bands for {industry} are malformed: {message}")]
    MalformedTierBands { industry: String, message: String },

    #[error("sub-industry multiplier {industry}/{sub_industry} is out of bounds: {message}")]
    InvalidMultiplier {
        industry: String,
        sub_industry: String,
        message: String,
    },

    #[error("snapshot store lock poisoned")]
    Lock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bands_display() {
        let err = ReferenceError::MalformedTierBands {
            industry: "hotel".into(),
            message: "bands overlap at 50".into(),
        };
        let s = err.to_string();
        assert!(s.contains("hotel"));
        assert!(s.contains("overlap"));
    }
}
