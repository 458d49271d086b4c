//! Monitoring escalation check.
//!
//! Fires on the inputs (assessment, flags, patient) rather than on the
//! generated plan, so it holds even when every drug class was excluded.

use crate::models::enums::{PainSeverity, RiskLevel};
use crate::models::{PainAssessment, PatientInfo};
use crate::risk::RiskFlag;

/// Flag category that always escalates monitoring.
pub const RESPIRATORY_CATEGORY: &str = "Respiratory";

/// Warning-or-worse flags needed to escalate on their own.
pub const HIGH_RISK_FLAG_THRESHOLD: usize = 2;

/// Why monitoring should be increased. Empty means it should not.
pub fn escalation_reasons(
    assessment: &PainAssessment,
    risk_flags: &[RiskFlag],
    patient: &PatientInfo,
) -> Vec<&'static str> {
    let mut reasons = Vec::new();

    if assessment.severity == PainSeverity::Severe {
        reasons.push("severe_pain");
    }
    if patient.is_elderly() {
        reasons.push("elderly");
    }
    if risk_flags.iter().any(|f| f.category == RESPIRATORY_CATEGORY) {
        reasons.push("respiratory_risk");
    }
    let high_risk = risk_flags
        .iter()
        .filter(|f| f.level >= RiskLevel::Warning)
        .count();
    if high_risk >= HIGH_RISK_FLAG_THRESHOLD {
        reasons.push("multiple_high_risk_flags");
    }

    reasons
}

pub fn should_increase_monitoring(
    assessment: &PainAssessment,
    risk_flags: &[RiskFlag],
    patient: &PatientInfo,
) -> bool {
    !escalation_reasons(assessment, risk_flags, patient).is_empty()
}
