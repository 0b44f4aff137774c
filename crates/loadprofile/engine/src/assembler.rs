//! Envelope assembler — collects the event log, computes the event summary,
//! and produces the final immutable [`Envelope`] with its deterministic
//! telemetry signature.

use crate::calculator::RawEnvelope;
use crate::invariants::InvariantReport;
use loadprofile_types::{Confidence, Envelope, EventLog, EventSummary, LoadContributor};

/// Round to `digits` fractional digits. Envelope numbers are published with
/// two digits of kW precision.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Content hash over industry slug, rounded envelope numbers, and confidence.
///
/// Repeated submissions of functionally identical input produce an identical
/// signature, which de-duplicates telemetry rows without caller-managed
/// idempotency keys.
pub fn signature(industry: &str, raw: &RawEnvelope, confidence: Confidence) -> String {
    let mut hasher = blake3::Hasher::new();
    let canonical = format!(
        "{industry}|{:.2}|{:.2}|{:.4}|{:.2}|{:.1}|{confidence}",
        raw.peak_kw,
        raw.avg_kw,
        raw.duty_cycle,
        raw.energy_kwh_per_day,
        raw.recommended_backup_hours,
    );
    hasher.update(canonical.as_bytes());
    hasher.finalize().to_hex().to_string()
}

pub fn assemble(
    industry: &str,
    raw: &RawEnvelope,
    contributors: Vec<LoadContributor>,
    confidence: Confidence,
    report: InvariantReport,
    log: EventLog,
) -> Envelope {
    let signature = signature(industry, raw, confidence);
    let events = log.into_events();
    let event_summary = EventSummary::from_events(&events);

    Envelope {
        industry: industry.to_string(),
        peak_kw: round_to(raw.peak_kw, 2),
        avg_kw: round_to(raw.avg_kw, 2),
        duty_cycle: round_to(raw.duty_cycle, 4),
        energy_kwh_per_day: round_to(raw.energy_kwh_per_day, 2),
        recommended_backup_hours: round_to(raw.recommended_backup_hours, 1),
        confidence,
        invariants_all_passed: report.all_passed,
        failed_invariant_keys: report.failed_keys,
        contributors,
        policy_events: events,
        event_summary,
        signature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadprofile_types::{codes, PolicyEvent, Severity};

    fn raw() -> RawEnvelope {
        RawEnvelope {
            peak_kw: 160.004,
            avg_kw: 96.002,
            duty_cycle: 0.6,
            energy_kwh_per_day: 2304.049,
            recommended_backup_hours: 6.25,
            base_load_kw: 160.004,
            rule_contributions: Vec::new(),
            operating_hours: 24.0,
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.005001, 2), 1.01);
        assert_eq!(round_to(0.12345, 4), 0.1235);
        assert_eq!(round_to(6.25, 1), 6.3);
    }

    #[test]
    fn identical_input_produces_identical_signature() {
        let a = signature("hotel", &raw(), Confidence::Standard);
        let b = signature("hotel", &raw(), Confidence::Standard);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_discriminates_fields() {
        let base = signature("hotel", &raw(), Confidence::Standard);
        assert_ne!(base, signature("car_wash", &raw(), Confidence::Standard));
        assert_ne!(base, signature("hotel", &raw(), Confidence::Fallback));

        let mut bumped = raw();
        bumped.peak_kw += 1.0;
        assert_ne!(base, signature("hotel", &bumped, Confidence::Standard));
    }

    #[test]
    fn sub_rounding_differences_share_a_signature() {
        let mut nearby = raw();
        nearby.peak_kw += 0.001;
        assert_eq!(
            signature("hotel", &raw(), Confidence::High),
            signature("hotel", &nearby, Confidence::High)
        );
    }

    #[test]
    fn assemble_summarizes_events() {
        let mut log = EventLog::new();
        log.push(PolicyEvent::new(codes::USED_DEFAULT, Severity::Info));
        log.push(PolicyEvent::new(codes::CLAMPED_INPUT, Severity::Warning));

        let envelope = assemble(
            "hotel",
            &raw(),
            Vec::new(),
            Confidence::Standard,
            InvariantReport {
                all_passed: true,
                failed_keys: Vec::new(),
            },
            log,
        );

        assert_eq!(envelope.peak_kw, 160.0);
        assert_eq!(envelope.event_summary.total, 2);
        assert_eq!(envelope.event_summary.max_severity, Some(Severity::Warning));
        assert_eq!(envelope.policy_events.len(), 2);
        assert!(envelope.invariants_all_passed);
    }
}
