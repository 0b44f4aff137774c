//! Reference entity shapes. All of these are immutable at request time:
//! versioned by migration in the authoring system, loaded here read-only.

use loadprofile_types::NormalizedInput;
use serde::{Deserialize, Serialize};

/// Per-industry base rates. One per industry slug.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub industry: String,
    /// Base peak demand per unit of the primary size field (kW per room,
    /// per bay, per charger, ...)
    pub base_peak_kw_per_unit: f64,
    pub base_monthly_kwh: f64,
    /// Free-form profile shape tag ("flat", "daytime_peak", ...)
    pub load_profile_type: String,
    pub default_backup_hours: f64,
    /// Where the base rates came from (survey, meter study, ...)
    pub data_source: String,
}

/// Optional per-sub-industry scaling. Zero or one applies per request;
/// absence means all multipliers are 1.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubIndustryMultiplier {
    pub industry: String,
    pub sub_industry: String,
    /// Scales peak demand
    pub load_multiplier: f64,
    /// Scales recommended backup duration, not the electrical envelope
    pub backup_multiplier: f64,
    /// Downstream pricing signals; not consumed by the envelope arithmetic
    pub solar_affinity: f64,
    pub ev_affinity: f64,
    pub typical_size_range: String,
}

impl SubIndustryMultiplier {
    /// The neutral multiplier used when no sub-industry applies.
    pub fn neutral(industry: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            sub_industry: String::new(),
            load_multiplier: 1.0,
            backup_multiplier: 1.0,
            solar_affinity: 0.0,
            ev_affinity: 0.0,
            typical_size_range: String::new(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.sub_industry.is_empty()
    }
}

/// Business-size bucket derived from the primary size field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl SizeTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for SizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One business-size band: the tier applies when the primary size value
/// falls within `[min_value, max_value]`. Bands are contiguous and
/// non-overlapping per industry; the store verifies overlap at load and the
/// resolver bridges gaps at request time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeTierBand {
    pub industry: String,
    pub tier: SizeTier,
    /// The primary size field these bands are keyed on
    pub size_field: String,
    pub min_value: f64,
    pub max_value: f64,
    /// How deep a questionnaire this tier of business gets
    pub questionnaire_depth: loadprofile_types::QuestionTier,
}

impl SizeTierBand {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }
}

/// Flat namespaced constant. Keys are prefixed by category
/// (`sizing.`, `ev_charging.`, `hotel.`, ...) to avoid collision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationConstant {
    pub key: String,
    pub category: String,
    pub numeric_value: f64,
    pub description: String,
}

/// Activation predicate for a contributor rule, evaluated against the
/// normalized input. Tagged variants keep the calculator industry-agnostic:
/// each industry owns a declarative rule list instead of branching code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationPredicate {
    Always,
    /// A boolean field is set
    FlagSet { field: String },
    /// A select field equals the given member
    TagEquals { field: String, value: String },
    /// A multi-select field contains the given member
    TagContains { field: String, value: String },
    /// A numeric field is at least `min`
    NumberAtLeast { field: String, min: f64 },
}

impl ActivationPredicate {
    pub fn holds(&self, input: &NormalizedInput) -> bool {
        match self {
            Self::Always => true,
            Self::FlagSet { field } => input.bool(field).unwrap_or(false),
            Self::TagEquals { field, value } => input.tag(field) == Some(value.as_str()),
            Self::TagContains { field, value } => input.tag_selected(field, value),
            Self::NumberAtLeast { field, min } => {
                input.number(field).is_some_and(|n| n >= *min)
            }
        }
    }
}

/// One declarative load-contributor rule. When the predicate holds, the
/// calculator adds `rate × count` to the peak total, where the rate is
/// resolved through the constant store and the count comes from
/// `count_field` (or 1.0 for flat adders).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContributorRule {
    /// Human-readable contributor label ("EV chargers", "pool pumps", ...)
    pub label: String,
    /// Constant-store key holding the per-unit kW rate; absence at
    /// calculation time is a fatal configuration defect
    pub rate_key: String,
    /// Numeric field supplying the unit count; `None` means a flat adder
    #[serde(default)]
    pub count_field: Option<String>,
    pub predicate: ActivationPredicate,
}
