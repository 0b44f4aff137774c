//! Input normalizer — validates and types raw question answers.
//!
//! Produces a [`NormalizedInput`] covering every catalog field that could be
//! coerced or defaulted. Irregular input is never discarded silently: clamps,
//! unknown enum members, and applied defaults all leave a policy event.

use loadprofile_types::{
    codes, EnvelopeError, EventLog, FieldType, NormalizedInput, PolicyEvent, Provenance,
    QuestionAnswer, QuestionCatalog, QuestionSpec, Severity, TypedValue,
};
use std::collections::BTreeSet;

/// Normalize one raw answer set against its industry catalog.
///
/// Fails only with [`EnvelopeError::MissingRequiredInput`] — every other
/// irregularity resolves to clamping or defaulting plus an event.
pub fn normalize(
    answers: &[QuestionAnswer],
    catalog: &QuestionCatalog,
    log: &mut EventLog,
) -> Result<NormalizedInput, EnvelopeError> {
    let mut input = NormalizedInput::new();

    for spec in &catalog.questions {
        let answer = answers.iter().find(|a| a.field_name == spec.field_name);

        let coerced = answer.and_then(|a| coerce(a, spec, log));
        match coerced {
            Some(value) => {
                // Wizard-prefilled answers count as defaults for confidence
                // scoring even though a value was present on the wire.
                let provenance = if answer.is_some_and(|a| a.was_defaulted) {
                    Provenance::Default
                } else {
                    Provenance::User
                };
                input.insert(spec.field_name.clone(), value, provenance, spec.tier);
            }
            None => apply_default(spec, &mut input, log)?,
        }
    }

    tracing::debug!(
        industry = %catalog.industry,
        fields = input.len(),
        "normalized questionnaire input"
    );
    Ok(input)
}

/// Coerce a raw answer to its declared type, or `None` when it must fall
/// through to the default path.
fn coerce(answer: &QuestionAnswer, spec: &QuestionSpec, log: &mut EventLog) -> Option<TypedValue> {
    // A null on the wire is an unanswered question, not an irregularity.
    if answer.raw_value.is_null() {
        return None;
    }
    match spec.field_type {
        FieldType::Number => coerce_number(answer, spec, log),
        FieldType::Bool => coerce_bool(answer, spec, log),
        FieldType::Select => coerce_tag(answer, spec, log),
        FieldType::MultiSelect => coerce_tags(answer, spec, log),
    }
}

fn coerce_number(
    answer: &QuestionAnswer,
    spec: &QuestionSpec,
    log: &mut EventLog,
) -> Option<TypedValue> {
    let parsed = match &answer.raw_value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(value) = parsed.filter(|v| v.is_finite()) else {
        log.push(
            PolicyEvent::new(codes::MALFORMED_NUMBER, Severity::Warning)
                .with("field", &spec.field_name)
                .with("raw", answer.raw_value.to_string()),
        );
        return None;
    };

    // Out-of-range values are clamped, never dropped.
    if let Some((min, max)) = spec.valid_range {
        let clamped = value.clamp(min, max);
        if clamped != value {
            log.push(
                PolicyEvent::new(codes::CLAMPED_INPUT, Severity::Warning)
                    .with("field", &spec.field_name)
                    .with("raw", format!("{value}"))
                    .with("clamped", format!("{clamped}")),
            );
            return Some(TypedValue::Number(clamped));
        }
    }
    Some(TypedValue::Number(value))
}

fn coerce_bool(
    answer: &QuestionAnswer,
    spec: &QuestionSpec,
    log: &mut EventLog,
) -> Option<TypedValue> {
    let parsed = match &answer.raw_value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };
    if parsed.is_none() {
        log.push(
            PolicyEvent::new(codes::UNKNOWN_ENUM_VALUE, Severity::Warning)
                .with("field", &spec.field_name)
                .with("raw", answer.raw_value.to_string()),
        );
    }
    parsed.map(TypedValue::Bool)
}

fn coerce_tag(
    answer: &QuestionAnswer,
    spec: &QuestionSpec,
    log: &mut EventLog,
) -> Option<TypedValue> {
    let tag = match answer.raw_value.as_str() {
        Some(s) => s.to_string(),
        None => {
            log.push(
                PolicyEvent::new(codes::UNKNOWN_ENUM_VALUE, Severity::Warning)
                    .with("field", &spec.field_name)
                    .with("value", answer.raw_value.to_string()),
            );
            return None;
        }
    };
    if is_member(&tag, spec) {
        Some(TypedValue::Tag(tag))
    } else {
        log.push(
            PolicyEvent::new(codes::UNKNOWN_ENUM_VALUE, Severity::Warning)
                .with("field", &spec.field_name)
                .with("value", tag),
        );
        None
    }
}

fn coerce_tags(
    answer: &QuestionAnswer,
    spec: &QuestionSpec,
    log: &mut EventLog,
) -> Option<TypedValue> {
    let raw_members: Vec<String> = match &answer.raw_value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        // A bare string is treated as a single-member selection.
        serde_json::Value::String(s) => vec![s.clone()],
        _ => return None,
    };

    let mut kept = BTreeSet::new();
    for member in raw_members {
        if is_member(&member, spec) {
            kept.insert(member);
        } else {
            log.push(
                PolicyEvent::new(codes::UNKNOWN_ENUM_VALUE, Severity::Warning)
                    .with("field", &spec.field_name)
                    .with("value", member),
            );
        }
    }

    if kept.is_empty() {
        None
    } else {
        Some(TypedValue::Tags(kept))
    }
}

fn is_member(value: &str, spec: &QuestionSpec) -> bool {
    spec.valid_enum
        .as_ref()
        .is_none_or(|members| members.iter().any(|m| m == value))
}

/// Fill in the catalog default, or fail for an essential field without one.
fn apply_default(
    spec: &QuestionSpec,
    input: &mut NormalizedInput,
    log: &mut EventLog,
) -> Result<(), EnvelopeError> {
    let default = spec.default.as_ref().and_then(|raw| {
        // Defaults are authored alongside the catalog and assumed
        // well-formed; a default that fails coercion is treated as absent.
        let answer = QuestionAnswer::new(spec.field_name.clone(), raw.clone(), spec.tier);
        let mut scratch = EventLog::new();
        coerce(&answer, spec, &mut scratch)
    });

    match default {
        Some(value) => {
            input.insert(spec.field_name.clone(), value, Provenance::Default, spec.tier);
            log.push(
                PolicyEvent::new(codes::USED_DEFAULT, Severity::Info)
                    .with("field", &spec.field_name)
                    .with("tier", spec.tier.to_string()),
            );
            Ok(())
        }
        None if spec.tier == loadprofile_types::QuestionTier::Essential => {
            Err(EnvelopeError::MissingRequiredInput {
                field_name: spec.field_name.clone(),
            })
        }
        // Optional field with no default: absence stays representable and
        // activation predicates simply stay inactive.
        None => Ok(()),
    }
}
