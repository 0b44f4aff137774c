//! Envelope calculator — combines normalized inputs, the resolved tier and
//! multiplier, and base rates into raw envelope numbers.
//!
//! This stage never fails for missing *optional* data (resolved upstream).
//! It fails only when a required calculation constant is absent from the
//! reference store: guessing an engineering constant is unsafe, so that is a
//! fatal configuration defect.

use crate::resolver::ResolvedContext;
use loadprofile_reference::{IndustryProfile, ReferenceStore};
use loadprofile_types::{
    codes, EnvelopeError, EventLog, NormalizedInput, PolicyEvent, QuestionCatalog, Severity,
};

/// Canonical field carrying daily operating hours, defaulted per industry by
/// the catalog.
pub const OPERATING_HOURS_FIELD: &str = "operating_hours";

/// Fallback constant consulted when the catalog does not declare an
/// operating-hours field at all.
pub const DEFAULT_OPERATING_HOURS_KEY: &str = "sizing.default_operating_hours";

/// Raw envelope numbers plus the per-rule decomposition the attributor needs.
#[derive(Clone, Debug)]
pub struct RawEnvelope {
    pub peak_kw: f64,
    pub avg_kw: f64,
    pub duty_cycle: f64,
    pub energy_kwh_per_day: f64,
    pub recommended_backup_hours: f64,
    /// Residual base load before contributor rules
    pub base_load_kw: f64,
    /// `(label, kW)` per activated contributor rule
    pub rule_contributions: Vec<(String, f64)>,
    /// The operating hours the energy figure was derived from
    pub operating_hours: f64,
}

pub fn compute(
    input: &NormalizedInput,
    catalog: &QuestionCatalog,
    ctx: &ResolvedContext,
    profile: &IndustryProfile,
    store: &impl ReferenceStore,
    log: &mut EventLog,
) -> Result<RawEnvelope, EnvelopeError> {
    let industry = catalog.industry.as_str();

    let unit_count = input.number(&catalog.primary_size_field).unwrap_or(0.0);
    let operating_hours = operating_hours(input, catalog, store)?;
    let recommended_backup_hours =
        profile.default_backup_hours * ctx.multiplier.backup_multiplier;

    // A facility with zero units has a zero envelope, not an error.
    if unit_count <= 0.0 {
        log.push(
            PolicyEvent::new(codes::ZERO_UNIT_COUNT, Severity::Info)
                .with("field", &catalog.primary_size_field),
        );
        return Ok(RawEnvelope {
            peak_kw: 0.0,
            avg_kw: 0.0,
            duty_cycle: 0.0,
            energy_kwh_per_day: 0.0,
            recommended_backup_hours,
            base_load_kw: 0.0,
            rule_contributions: Vec::new(),
            operating_hours,
        });
    }

    let base_load_kw = profile.base_peak_kw_per_unit
        * unit_count
        * ctx.tier_load_multiplier
        * ctx.multiplier.load_multiplier;

    let mut peak_kw = base_load_kw;
    let mut rule_contributions = Vec::new();
    for rule in store.contributor_rules(industry) {
        if !rule.predicate.holds(input) {
            continue;
        }
        let rate = store
            .constant(&rule.rate_key)
            .ok_or_else(|| EnvelopeError::InvalidConstantLookup {
                key: rule.rate_key.clone(),
            })?;
        let count = match &rule.count_field {
            Some(field) => input.number(field).unwrap_or(0.0),
            None => 1.0,
        };
        let kw = rate * count;
        if kw > 0.0 {
            peak_kw += kw;
            rule_contributions.push((rule.label.clone(), kw));
        }
    }

    let load_factor_key = format!("{industry}.load_factor");
    let load_factor = store
        .constant(&load_factor_key)
        .ok_or(EnvelopeError::InvalidConstantLookup {
            key: load_factor_key,
        })?;
    // Load factor is average over peak and must sit in [0, 1]; values
    // outside are clamped so a data typo cannot invert the envelope.
    let load_factor = if (0.0..=1.0).contains(&load_factor) {
        load_factor
    } else {
        tracing::warn!(industry, load_factor, "load factor outside [0, 1], clamping");
        load_factor.clamp(0.0, 1.0)
    };

    let avg_kw = peak_kw * load_factor;
    let duty_cycle = if peak_kw > 0.0 { avg_kw / peak_kw } else { 0.0 };
    let energy_kwh_per_day = avg_kw * operating_hours;

    tracing::debug!(
        industry,
        peak_kw,
        avg_kw,
        energy_kwh_per_day,
        "computed raw envelope"
    );

    Ok(RawEnvelope {
        peak_kw,
        avg_kw,
        duty_cycle,
        energy_kwh_per_day,
        recommended_backup_hours,
        base_load_kw,
        rule_contributions,
        operating_hours,
    })
}

fn operating_hours(
    input: &NormalizedInput,
    catalog: &QuestionCatalog,
    store: &impl ReferenceStore,
) -> Result<f64, EnvelopeError> {
    if let Some(hours) = input.number(OPERATING_HOURS_FIELD) {
        return Ok(hours);
    }
    // Reachable when the catalog leaves the field undeclared or declares it
    // without a default; the global sizing constant is the last resort.
    tracing::debug!(
        industry = %catalog.industry,
        "operating hours absent from input, using sizing default"
    );
    store.constant(DEFAULT_OPERATING_HOURS_KEY).ok_or(
        EnvelopeError::InvalidConstantLookup {
            key: DEFAULT_OPERATING_HOURS_KEY.to_string(),
        },
    )
}
