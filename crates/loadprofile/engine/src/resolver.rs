//! Tier & multiplier resolver.
//!
//! Resolves the business-size tier band from the primary size field and the
//! optional sub-industry multiplier. Always returns a tier: gaps in the band
//! data degrade to the nearest band with a `tier_range_gap` warning instead
//! of failing the whole calculation.

use loadprofile_reference::{ReferenceStore, SizeTierBand, SubIndustryMultiplier};
use loadprofile_types::{
    codes, EnvelopeError, EventLog, NormalizedInput, PolicyEvent, QuestionCatalog, Severity,
};

/// Resolved request context: the size tier band, the load multiplier its
/// tier implies, and the (possibly neutral) sub-industry multiplier.
#[derive(Clone, Debug)]
pub struct ResolvedContext {
    pub tier_band: SizeTierBand,
    /// From constant `sizing.tier_load_multiplier.<tier>`
    pub tier_load_multiplier: f64,
    pub multiplier: SubIndustryMultiplier,
}

pub fn resolve(
    input: &NormalizedInput,
    catalog: &QuestionCatalog,
    store: &impl ReferenceStore,
    log: &mut EventLog,
) -> Result<ResolvedContext, EnvelopeError> {
    let industry = catalog.industry.as_str();

    let size_value = input.number(&catalog.primary_size_field).ok_or_else(|| {
        // The normalizer guarantees an entry for every catalog field; a
        // non-numeric primary size field means the catalog is wrong.
        EnvelopeError::MalformedCatalog {
            industry: industry.to_string(),
            field_name: catalog.primary_size_field.clone(),
        }
    })?;

    let tier_band = locate_band(industry, size_value, store, log)?.clone();

    let tier_key = format!("sizing.tier_load_multiplier.{}", tier_band.tier);
    let tier_load_multiplier = store
        .constant(&tier_key)
        .ok_or(EnvelopeError::InvalidConstantLookup { key: tier_key })?;

    let multiplier = resolve_multiplier(input, catalog, store, log);

    tracing::debug!(
        industry,
        tier = %tier_band.tier,
        sub_industry = %multiplier.sub_industry,
        "resolved tier and multiplier"
    );

    Ok(ResolvedContext {
        tier_band,
        tier_load_multiplier,
        multiplier,
    })
}

/// Locate the band containing `value`, bridging gaps in the reference data.
fn locate_band<'a>(
    industry: &str,
    value: f64,
    store: &'a impl ReferenceStore,
    log: &mut EventLog,
) -> Result<&'a SizeTierBand, EnvelopeError> {
    let bands = store.tier_bands(industry);
    if bands.is_empty() {
        return Err(EnvelopeError::MalformedTierBands {
            industry: industry.to_string(),
            message: "no size tier bands declared".into(),
        });
    }

    if let Some(band) = bands.iter().find(|b| b.contains(value)) {
        return Ok(band);
    }

    // Gap rule: the band with the closest max below the value; the highest
    // band when the value exceeds all ranges; the lowest band when the value
    // sits below all ranges. Bands arrive sorted ascending by min_value.
    let band = bands
        .iter()
        .filter(|b| b.max_value < value)
        .last()
        .unwrap_or(&bands[0]);

    tracing::warn!(industry, value, tier = %band.tier, "size value fell into tier band gap");
    log.push(
        PolicyEvent::new(codes::TIER_RANGE_GAP, Severity::Warning)
            .with("field", &band.size_field)
            .with("value", format!("{value}"))
            .with("resolved_tier", band.tier.to_string()),
    );
    Ok(band)
}

/// Resolve the sub-industry multiplier, or the neutral multiplier when no
/// sub-industry applies (the normal case, not a degradation).
fn resolve_multiplier(
    input: &NormalizedInput,
    catalog: &QuestionCatalog,
    store: &impl ReferenceStore,
    log: &mut EventLog,
) -> SubIndustryMultiplier {
    let industry = catalog.industry.as_str();
    let Some(field) = catalog.sub_industry_field.as_deref() else {
        return SubIndustryMultiplier::neutral(industry);
    };
    let Some(sub_industry) = input.tag(field) else {
        return SubIndustryMultiplier::neutral(industry);
    };

    match store.sub_industry_multiplier(industry, sub_industry) {
        Some(multiplier) => multiplier.clone(),
        None => {
            // The catalog and the multiplier table version independently;
            // a valid selection with no row degrades to neutral.
            log.push(
                PolicyEvent::new(codes::SUBINDUSTRY_NOT_FOUND, Severity::Warning)
                    .with("industry", industry)
                    .with("sub_industry", sub_industry),
            );
            SubIndustryMultiplier::neutral(industry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadprofile_reference::{
        CalculationConstant, ReferenceData, ReferenceSnapshot, SizeTier,
    };
    use loadprofile_types::{Provenance, QuestionSpec, QuestionTier, TypedValue};

    fn band(tier: SizeTier, min: f64, max: f64) -> SizeTierBand {
        SizeTierBand {
            industry: "hotel".into(),
            tier,
            size_field: "room_count".into(),
            min_value: min,
            max_value: max,
            questionnaire_depth: QuestionTier::Standard,
        }
    }

    fn constant(key: &str, value: f64) -> CalculationConstant {
        CalculationConstant {
            key: key.into(),
            category: key.split('.').next().unwrap_or("sizing").into(),
            numeric_value: value,
            description: String::new(),
        }
    }

    fn snapshot() -> ReferenceSnapshot {
        let mut boutique = SubIndustryMultiplier::neutral("hotel");
        boutique.sub_industry = "boutique".into();
        boutique.load_multiplier = 1.10;
        boutique.backup_multiplier = 1.25;

        ReferenceSnapshot::from_data(ReferenceData {
            size_tier_bands: vec![
                band(SizeTier::Small, 1.0, 49.0),
                band(SizeTier::Medium, 50.0, 150.0),
                // Deliberate gap between 150 and 200.
                band(SizeTier::Large, 200.0, 400.0),
            ],
            sub_industry_multipliers: vec![boutique],
            constants: vec![
                constant("sizing.tier_load_multiplier.small", 1.0),
                constant("sizing.tier_load_multiplier.medium", 0.95),
                constant("sizing.tier_load_multiplier.large", 0.9),
                constant("sizing.tier_load_multiplier.enterprise", 0.85),
            ],
            ..Default::default()
        })
        .unwrap()
    }

    fn catalog() -> QuestionCatalog {
        QuestionCatalog {
            industry: "hotel".into(),
            primary_size_field: "room_count".into(),
            sub_industry_field: Some("sub_industry".into()),
            questions: vec![
                QuestionSpec::number("room_count", QuestionTier::Essential),
                QuestionSpec::select(
                    "sub_industry",
                    QuestionTier::Standard,
                    vec!["boutique".into()],
                ),
            ],
        }
    }

    fn input(rooms: f64, sub: Option<&str>) -> NormalizedInput {
        let mut input = NormalizedInput::new();
        input.insert(
            "room_count",
            TypedValue::Number(rooms),
            Provenance::User,
            QuestionTier::Essential,
        );
        if let Some(sub) = sub {
            input.insert(
                "sub_industry",
                TypedValue::Tag(sub.into()),
                Provenance::User,
                QuestionTier::Standard,
            );
        }
        input
    }

    #[test]
    fn contained_value_resolves_without_events() {
        let mut log = EventLog::new();
        let ctx = resolve(&input(75.0, None), &catalog(), &snapshot(), &mut log).unwrap();

        assert_eq!(ctx.tier_band.tier, SizeTier::Medium);
        assert_eq!(ctx.tier_load_multiplier, 0.95);
        assert!(ctx.multiplier.is_neutral());
        assert!(log.is_empty());
    }

    #[test]
    fn gap_selects_closest_band_below() {
        let mut log = EventLog::new();
        let ctx = resolve(&input(170.0, None), &catalog(), &snapshot(), &mut log).unwrap();

        assert_eq!(ctx.tier_band.tier, SizeTier::Medium);
        assert_eq!(log.count_of(codes::TIER_RANGE_GAP), 1);
    }

    #[test]
    fn value_above_all_bands_selects_highest() {
        let mut log = EventLog::new();
        let ctx = resolve(&input(9000.0, None), &catalog(), &snapshot(), &mut log).unwrap();

        assert_eq!(ctx.tier_band.tier, SizeTier::Large);
        assert_eq!(log.count_of(codes::TIER_RANGE_GAP), 1);
    }

    #[test]
    fn value_below_all_bands_selects_lowest() {
        let mut log = EventLog::new();
        let ctx = resolve(&input(0.5, None), &catalog(), &snapshot(), &mut log).unwrap();

        assert_eq!(ctx.tier_band.tier, SizeTier::Small);
        assert_eq!(log.count_of(codes::TIER_RANGE_GAP), 1);
    }

    #[test]
    fn sub_industry_multiplier_applies() {
        let mut log = EventLog::new();
        let ctx = resolve(
            &input(75.0, Some("boutique")),
            &catalog(),
            &snapshot(),
            &mut log,
        )
        .unwrap();

        assert_eq!(ctx.multiplier.load_multiplier, 1.10);
        assert_eq!(ctx.multiplier.backup_multiplier, 1.25);
        assert!(log.is_empty());
    }

    #[test]
    fn missing_multiplier_row_degrades_to_neutral() {
        let mut log = EventLog::new();
        let ctx = resolve(
            &input(75.0, Some("resort")),
            &catalog(),
            &snapshot(),
            &mut log,
        )
        .unwrap();

        assert!(ctx.multiplier.is_neutral());
        assert_eq!(log.count_of(codes::SUBINDUSTRY_NOT_FOUND), 1);
    }

    #[test]
    fn missing_tier_constant_is_fatal() {
        let snapshot = ReferenceSnapshot::from_data(ReferenceData {
            size_tier_bands: vec![band(SizeTier::Small, 1.0, 49.0)],
            ..Default::default()
        })
        .unwrap();
        let mut log = EventLog::new();
        let result = resolve(&input(10.0, None), &catalog(), &snapshot, &mut log);

        assert!(matches!(
            result,
            Err(EnvelopeError::InvalidConstantLookup { .. })
        ));
    }

    #[test]
    fn no_bands_is_a_configuration_defect() {
        let snapshot = ReferenceSnapshot::from_data(ReferenceData::default()).unwrap();
        let mut log = EventLog::new();
        let result = resolve(&input(10.0, None), &catalog(), &snapshot, &mut log);

        assert!(matches!(
            result,
            Err(EnvelopeError::MalformedTierBands { .. })
        ));
    }
}
