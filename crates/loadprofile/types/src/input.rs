//! Raw and normalized questionnaire input.

use crate::value::{Provenance, QuestionTier, TypedValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw answer as submitted by the wizard. Consumed read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub field_name: String,
    /// Untyped wire value; the normalizer coerces it against the catalog
    pub raw_value: serde_json::Value,
    /// Whether the wizard itself pre-filled this answer
    #[serde(default)]
    pub was_defaulted: bool,
    pub tier: QuestionTier,
}

impl QuestionAnswer {
    pub fn new(
        field_name: impl Into<String>,
        raw_value: serde_json::Value,
        tier: QuestionTier,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            raw_value,
            was_defaulted: false,
            tier,
        }
    }
}

/// One typed, provenance-tagged entry of the normalized input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue {
    pub value: TypedValue,
    pub provenance: Provenance,
    pub tier: QuestionTier,
}

/// Normalized input: every field the catalog declares has an entry, even if
/// it had to be defaulted. Ordered map so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInput {
    entries: BTreeMap<String, NormalizedValue>,
}

impl NormalizedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        field_name: impl Into<String>,
        value: TypedValue,
        provenance: Provenance,
        tier: QuestionTier,
    ) {
        self.entries.insert(
            field_name.into(),
            NormalizedValue {
                value,
                provenance,
                tier,
            },
        );
    }

    pub fn get(&self, field_name: &str) -> Option<&NormalizedValue> {
        self.entries.get(field_name)
    }

    pub fn number(&self, field_name: &str) -> Option<f64> {
        self.entries.get(field_name).and_then(|e| e.value.as_number())
    }

    pub fn bool(&self, field_name: &str) -> Option<bool> {
        self.entries.get(field_name).and_then(|e| e.value.as_bool())
    }

    pub fn tag(&self, field_name: &str) -> Option<&str> {
        self.entries.get(field_name).and_then(|e| e.value.as_tag())
    }

    /// Whether the multi-select field contains the given member.
    pub fn tag_selected(&self, field_name: &str, member: &str) -> bool {
        self.entries
            .get(field_name)
            .and_then(|e| e.value.as_tags())
            .is_some_and(|tags| tags.contains(member))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count fields in `tier`, optionally only the defaulted ones.
    pub fn tier_count(&self, tier: QuestionTier, defaulted_only: bool) -> usize {
        self.entries
            .values()
            .filter(|e| e.tier == tier && (!defaulted_only || e.provenance.is_default()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let mut input = NormalizedInput::new();
        input.insert(
            "room_count",
            TypedValue::Number(150.0),
            Provenance::User,
            QuestionTier::Essential,
        );
        input.insert(
            "has_pool",
            TypedValue::Bool(true),
            Provenance::Default,
            QuestionTier::Standard,
        );

        assert_eq!(input.number("room_count"), Some(150.0));
        assert_eq!(input.bool("has_pool"), Some(true));
        assert_eq!(input.number("has_pool"), None);
        assert_eq!(input.number("missing"), None);
    }

    #[test]
    fn tier_counts_split_by_provenance() {
        let mut input = NormalizedInput::new();
        input.insert(
            "a",
            TypedValue::Number(1.0),
            Provenance::User,
            QuestionTier::Standard,
        );
        input.insert(
            "b",
            TypedValue::Number(2.0),
            Provenance::Default,
            QuestionTier::Standard,
        );

        assert_eq!(input.tier_count(QuestionTier::Standard, false), 2);
        assert_eq!(input.tier_count(QuestionTier::Standard, true), 1);
        assert_eq!(input.tier_count(QuestionTier::Essential, false), 0);
    }

    #[test]
    fn multi_select_membership() {
        let mut input = NormalizedInput::new();
        let tags = ["sauna", "spa"].iter().map(|s| s.to_string()).collect();
        input.insert(
            "amenities",
            TypedValue::Tags(tags),
            Provenance::User,
            QuestionTier::Detailed,
        );

        assert!(input.tag_selected("amenities", "spa"));
        assert!(!input.tag_selected("amenities", "gym"));
        assert!(!input.tag_selected("missing", "spa"));
    }
}
