//! Question catalog — the input-boundary description of one industry's
//! question set. The calculator does not know how catalogs are authored or
//! stored; it only reads field names, types, tiers, defaults, and valid
//! ranges/enums.

use crate::value::QuestionTier;
use serde::{Deserialize, Serialize};

/// Declared type of a questionnaire field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Number,
    Bool,
    /// Single enum selection
    Select,
    /// Multi-select enum
    MultiSelect,
}

/// One field declaration in an industry's question catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// Canonical field name, stable across catalog versions
    pub field_name: String,
    pub field_type: FieldType,
    pub tier: QuestionTier,
    /// Catalog default, in the same raw shape the wizard submits
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Declared [min, max] for numeric fields; values outside are clamped
    #[serde(default)]
    pub valid_range: Option<(f64, f64)>,
    /// Declared members for select/multi-select fields
    #[serde(default)]
    pub valid_enum: Option<Vec<String>>,
}

impl QuestionSpec {
    pub fn number(field_name: impl Into<String>, tier: QuestionTier) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: FieldType::Number,
            tier,
            default: None,
            valid_range: None,
            valid_enum: None,
        }
    }

    pub fn select(
        field_name: impl Into<String>,
        tier: QuestionTier,
        members: Vec<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: FieldType::Select,
            tier,
            default: None,
            valid_range: None,
            valid_enum: Some(members),
        }
    }

    pub fn boolean(field_name: impl Into<String>, tier: QuestionTier) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: FieldType::Bool,
            tier,
            default: None,
            valid_range: None,
            valid_enum: None,
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.valid_range = Some((min, max));
        self
    }
}

/// One industry's question catalog.
///
/// Invariant: `primary_size_field` and, when declared, `sub_industry_field`
/// name entries in `questions`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub industry: String,
    /// The field whose value drives unit count and business-size tier
    pub primary_size_field: String,
    /// The field carrying the sub-industry selection, when the industry has one
    #[serde(default)]
    pub sub_industry_field: Option<String>,
    pub questions: Vec<QuestionSpec>,
}

impl QuestionCatalog {
    pub fn question(&self, field_name: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.field_name == field_name)
    }

    /// Count catalog fields in the given tier.
    pub fn tier_count(&self, tier: QuestionTier) -> usize {
        self.questions.iter().filter(|q| q.tier == tier).count()
    }
}
