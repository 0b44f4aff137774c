//! The end-to-end pipeline: one wizard submission in, one immutable
//! envelope out.

use crate::{assembler, attributor, calculator, confidence, invariants, normalizer, resolver};
use loadprofile_reference::ReferenceStore;
use loadprofile_types::{Envelope, EnvelopeError, EventLog, QuestionAnswer, QuestionCatalog};

/// One wizard submission: the raw answer set plus the declaring industry's
/// question catalog. The calculator does not know how either is authored.
#[derive(Clone, Debug)]
pub struct EnvelopeRequest {
    pub catalog: QuestionCatalog,
    pub answers: Vec<QuestionAnswer>,
}

/// The envelope calculator. Stateless apart from configuration; one instance
/// may serve any number of concurrent calculations.
#[derive(Clone, Debug)]
pub struct EnvelopeCalculator {
    top_contributors: usize,
}

impl EnvelopeCalculator {
    pub fn new() -> Self {
        Self {
            top_contributors: attributor::DEFAULT_TOP_CONTRIBUTORS,
        }
    }

    /// Cap the emitted contributor list (including the `"other"` entry).
    pub fn with_top_contributors(mut self, top_n: usize) -> Self {
        self.top_contributors = top_n.max(1);
        self
    }

    /// Run the full pipeline over one submission.
    ///
    /// Fails for a missing required input (caller re-prompts the user) or a
    /// configuration defect (broken reference data); every other
    /// irregularity degrades gracefully and is recorded as a policy event
    /// on the returned envelope.
    pub fn calculate(
        &self,
        request: &EnvelopeRequest,
        store: &impl ReferenceStore,
    ) -> Result<Envelope, EnvelopeError> {
        let industry = request.catalog.industry.as_str();
        let profile = store.industry_profile(industry).ok_or_else(|| {
            EnvelopeError::UnknownIndustry {
                industry: industry.to_string(),
            }
        })?;

        let mut log = EventLog::new();
        let input = normalizer::normalize(&request.answers, &request.catalog, &mut log)?;
        let ctx = resolver::resolve(&input, &request.catalog, store, &mut log)?;
        let raw = calculator::compute(&input, &request.catalog, &ctx, profile, store, &mut log)?;
        let contributors = attributor::attribute(&raw, self.top_contributors)?;
        let confidence = confidence::assess(&input);
        let report = invariants::validate(&raw, &contributors, &mut log);

        let envelope = assembler::assemble(industry, &raw, contributors, confidence, report, log);
        tracing::debug!(
            industry,
            peak_kw = envelope.peak_kw,
            confidence = %envelope.confidence,
            invariants_all_passed = envelope.invariants_all_passed,
            "assembled envelope"
        );
        Ok(envelope)
    }
}

impl Default for EnvelopeCalculator {
    fn default() -> Self {
        Self::new()
    }
}
