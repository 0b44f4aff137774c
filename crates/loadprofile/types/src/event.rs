//! Policy events — structured, severity-tagged records of every decision the
//! calculator made when data was imperfect (default used, value clamped,
//! invariant failed). Events are append-only: built during one calculation
//! pass and never mutated after emission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known policy event codes.
pub mod codes {
    /// A catalog default stood in for a missing answer
    pub const USED_DEFAULT: &str = "used_default";
    /// A numeric answer was outside its declared range and was clamped
    pub const CLAMPED_INPUT: &str = "clamped_input";
    /// An enum answer was not among the declared members
    pub const UNKNOWN_ENUM_VALUE: &str = "unknown_enum_value";
    /// A numeric answer could not be parsed and was treated as absent
    pub const MALFORMED_NUMBER: &str = "malformed_number";
    /// A selected sub-industry has no multiplier row in the reference data
    pub const SUBINDUSTRY_NOT_FOUND: &str = "subindustry_not_found";
    /// The primary size value fell into a gap in the tier bands
    pub const TIER_RANGE_GAP: &str = "tier_range_gap";
    /// The primary size value was zero; the envelope collapses to zero
    pub const ZERO_UNIT_COUNT: &str = "zero_unit_count";
    /// A named envelope invariant failed validation
    pub const INVARIANT_FAILED: &str = "invariant_failed";
}

/// Event severity, ordered `Info < Warning < Error`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One policy event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyEvent {
    pub code: String,
    pub severity: Severity,
    /// Ordered so serialization and signatures stay deterministic
    pub context: BTreeMap<String, String>,
}

impl PolicyEvent {
    pub fn new(code: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            severity,
            context: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Append-only event log threaded through the calculation pipeline.
///
/// Every stage appends; nothing is removed or reordered. The assembler reads
/// the log once at the end to build the event summary.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<PolicyEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PolicyEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[PolicyEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count of events carrying the given code.
    pub fn count_of(&self, code: &str) -> usize {
        self.events.iter().filter(|e| e.code == code).count()
    }

    pub fn into_events(self) -> Vec<PolicyEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(
            [Severity::Warning, Severity::Info, Severity::Error]
                .iter()
                .max(),
            Some(&Severity::Error)
        );
    }

    #[test]
    fn log_preserves_emission_order() {
        let mut log = EventLog::new();
        log.push(PolicyEvent::new(codes::USED_DEFAULT, Severity::Info).with("field", "a"));
        log.push(PolicyEvent::new(codes::CLAMPED_INPUT, Severity::Warning).with("field", "b"));

        let events = log.events();
        assert_eq!(events[0].code, codes::USED_DEFAULT);
        assert_eq!(events[1].code, codes::CLAMPED_INPUT);
        assert_eq!(log.count_of(codes::USED_DEFAULT), 1);
    }

    #[test]
    fn event_context_is_ordered() {
        let event = PolicyEvent::new(codes::CLAMPED_INPUT, Severity::Warning)
            .with("z_last", "1")
            .with("a_first", "2");
        let keys: Vec<_> = event.context.keys().cloned().collect();
        assert_eq!(keys, vec!["a_first", "z_last"]);
    }
}
