//! Shared fixtures: a small but realistic reference snapshot and catalogs
//! for the hotel and car-wash industries.

use loadprofile_reference::{
    ActivationPredicate, CalculationConstant, ContributorRule, IndustryProfile, ReferenceData,
    ReferenceSnapshot, SizeTier, SizeTierBand, SubIndustryMultiplier,
};
use loadprofile_types::{QuestionCatalog, QuestionSpec, QuestionTier};
use serde_json::json;
use std::collections::BTreeMap;

pub fn constant(key: &str, value: f64) -> CalculationConstant {
    CalculationConstant {
        key: key.into(),
        category: key.split('.').next().unwrap_or("sizing").into(),
        numeric_value: value,
        description: String::new(),
    }
}

fn band(industry: &str, field: &str, tier: SizeTier, min: f64, max: f64) -> SizeTierBand {
    SizeTierBand {
        industry: industry.into(),
        tier,
        size_field: field.into(),
        min_value: min,
        max_value: max,
        questionnaire_depth: QuestionTier::Standard,
    }
}

pub fn snapshot() -> ReferenceSnapshot {
    let boutique = SubIndustryMultiplier {
        industry: "hotel".into(),
        sub_industry: "boutique".into(),
        load_multiplier: 1.10,
        backup_multiplier: 1.25,
        solar_affinity: 0.4,
        ev_affinity: 0.6,
        typical_size_range: "20-150 rooms".into(),
    };

    let mut rules: BTreeMap<String, Vec<ContributorRule>> = BTreeMap::new();
    rules.insert(
        "hotel".into(),
        vec![
            ContributorRule {
                label: "pool pumps".into(),
                rate_key: "hotel.pool_pump_kw".into(),
                count_field: None,
                predicate: ActivationPredicate::FlagSet {
                    field: "has_pool".into(),
                },
            },
            ContributorRule {
                label: "on-site laundry".into(),
                rate_key: "hotel.laundry_kw".into(),
                count_field: None,
                predicate: ActivationPredicate::TagEquals {
                    field: "laundry".into(),
                    value: "on_site".into(),
                },
            },
            ContributorRule {
                label: "EV chargers".into(),
                rate_key: "ev_charging.level2_kw".into(),
                count_field: Some("ev_chargers".into()),
                predicate: ActivationPredicate::NumberAtLeast {
                    field: "ev_chargers".into(),
                    min: 1.0,
                },
            },
        ],
    );
    rules.insert(
        "car_wash".into(),
        vec![ContributorRule {
            label: "vacuum stations".into(),
            rate_key: "car_wash.vacuum_kw".into(),
            count_field: None,
            predicate: ActivationPredicate::FlagSet {
                field: "has_vacuums".into(),
            },
        }],
    );

    ReferenceSnapshot::from_data(ReferenceData {
        industry_profiles: vec![
            IndustryProfile {
                industry: "hotel".into(),
                base_peak_kw_per_unit: 1.6,
                base_monthly_kwh: 90_000.0,
                load_profile_type: "evening_peak".into(),
                default_backup_hours: 6.0,
                data_source: "2024 meter study".into(),
            },
            IndustryProfile {
                industry: "car_wash".into(),
                base_peak_kw_per_unit: 4.0,
                base_monthly_kwh: 12_000.0,
                load_profile_type: "daytime_peak".into(),
                default_backup_hours: 4.0,
                data_source: "2024 meter study".into(),
            },
        ],
        sub_industry_multipliers: vec![boutique],
        size_tier_bands: vec![
            band("hotel", "room_count", SizeTier::Small, 1.0, 49.0),
            band("hotel", "room_count", SizeTier::Medium, 50.0, 150.0),
            band("hotel", "room_count", SizeTier::Large, 151.0, 400.0),
            band("hotel", "room_count", SizeTier::Enterprise, 401.0, 5000.0),
            band("car_wash", "bay_count", SizeTier::Small, 0.0, 4.0),
            band("car_wash", "bay_count", SizeTier::Medium, 5.0, 12.0),
            band("car_wash", "bay_count", SizeTier::Large, 13.0, 30.0),
            band("car_wash", "bay_count", SizeTier::Enterprise, 31.0, 100.0),
        ],
        constants: vec![
            constant("sizing.tier_load_multiplier.small", 1.0),
            constant("sizing.tier_load_multiplier.medium", 1.0),
            constant("sizing.tier_load_multiplier.large", 1.0),
            constant("sizing.tier_load_multiplier.enterprise", 1.0),
            constant("sizing.default_operating_hours", 24.0),
            constant("hotel.load_factor", 0.62),
            constant("hotel.pool_pump_kw", 15.0),
            constant("hotel.laundry_kw", 30.0),
            constant("ev_charging.level2_kw", 11.5),
            constant("car_wash.load_factor", 0.30),
            constant("car_wash.vacuum_kw", 10.0),
        ],
        contributor_rules: rules,
    })
    .unwrap()
}

pub fn hotel_catalog() -> QuestionCatalog {
    QuestionCatalog {
        industry: "hotel".into(),
        primary_size_field: "room_count".into(),
        sub_industry_field: Some("sub_industry".into()),
        questions: vec![
            QuestionSpec::number("room_count", QuestionTier::Essential).with_range(1.0, 2000.0),
            QuestionSpec::select(
                "sub_industry",
                QuestionTier::Standard,
                vec!["boutique".into(), "resort".into(), "economy".into()],
            ),
            QuestionSpec::number("operating_hours", QuestionTier::Standard)
                .with_default(json!(24))
                .with_range(1.0, 24.0),
            QuestionSpec::boolean("has_pool", QuestionTier::Standard).with_default(json!(false)),
            QuestionSpec::select(
                "laundry",
                QuestionTier::Standard,
                vec!["on_site".into(), "outsourced".into()],
            )
            .with_default(json!("outsourced")),
            QuestionSpec::number("ev_chargers", QuestionTier::Detailed)
                .with_default(json!(0))
                .with_range(0.0, 200.0),
        ],
    }
}

pub fn car_wash_catalog() -> QuestionCatalog {
    QuestionCatalog {
        industry: "car_wash".into(),
        primary_size_field: "bay_count".into(),
        sub_industry_field: None,
        questions: vec![
            QuestionSpec::number("bay_count", QuestionTier::Essential).with_range(0.0, 100.0),
            QuestionSpec::number("operating_hours", QuestionTier::Standard)
                .with_default(json!(14))
                .with_range(1.0, 24.0),
            QuestionSpec::boolean("has_vacuums", QuestionTier::Standard)
                .with_default(json!(true)),
        ],
    }
}
