use crate::analgesic::AnalgesicRecommendation;
use crate::ids::IdSource;
use crate::models::enums::{PainContext, PainSeverity, RedFlagKind, RedFlagSeverity, RiskLevel};
use crate::models::{PainAssessment, PatientInfo};
use crate::risk::RiskFlag;

use super::types::RedFlag;

/// Red flags for one plan, in fixed emission order.
///
/// The escalating-pain flag is always present, so the result is never empty.
pub fn generate_red_flags(
    assessment: &PainAssessment,
    recommendations: &[AnalgesicRecommendation],
    risk_flags: &[RiskFlag],
    patient: &PatientInfo,
    ids: &dyn IdSource,
) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    let mut emit = |kind, severity, title: &str, description: String, action: &str| {
        flags.push(RedFlag {
            id: ids.next_id(),
            kind,
            severity,
            title: title.to_string(),
            description,
            action: action.to_string(),
        });
    };

    emit(
        RedFlagKind::EscalatingPain,
        RedFlagSeverity::Critical,
        "Escalating pain despite treatment",
        "Pain that increases or fails to respond to the planned analgesia may signal a new or worsening complication (compartment syndrome, infection, ischaemia).".into(),
        "Reassess urgently and escalate to the responsible clinician",
    );

    if assessment.severity == PainSeverity::Severe {
        emit(
            RedFlagKind::SeverePain,
            RedFlagSeverity::Warning,
            "Severe pain reported",
            format!(
                "Pain scored {}/{} on {}; requires prompt analgesia and frequent reassessment.",
                assessment.score, assessment.max_score, assessment.scale_used
            ),
            "Reassess pain within 30 minutes of each intervention",
        );
    }

    if recommendations.iter().any(|r| r.class.is_opioid()) {
        emit(
            RedFlagKind::OpioidToxicity,
            RedFlagSeverity::Critical,
            "Signs of opioid toxicity",
            "Watch for excessive sedation, respiratory rate below 8 per minute, pinpoint pupils or falling oxygen saturation.".into(),
            "Stop opioid, support airway and give naloxone per protocol",
        );
        if patient.is_elderly() {
            emit(
                RedFlagKind::ElderlyOpioidSensitivity,
                RedFlagSeverity::Warning,
                "Increased opioid sensitivity in older adult",
                "Older patients are prone to delirium, falls and respiratory depression at standard opioid doses.".into(),
                "Start at reduced dose and monitor cognition and sedation closely",
            );
        }
    }

    if recommendations.iter().any(|r| r.class.is_nsaid()) {
        emit(
            RedFlagKind::NsaidAdverseEffects,
            RedFlagSeverity::Warning,
            "NSAID adverse effects",
            "Watch for GI bleeding (melena, haematemesis), reduced urine output or rising blood pressure.".into(),
            "Stop NSAID and review if any adverse sign appears",
        );
    }

    if assessment.pain_context == PainContext::Procedural {
        emit(
            RedFlagKind::InadequateProceduralAnalgesia,
            RedFlagSeverity::Warning,
            "Inadequate procedural analgesia",
            "Distress or pain during the procedure indicates pre-emptive analgesia was insufficient.".into(),
            "Pause the procedure and provide additional analgesia before continuing",
        );
    }

    let contraindications: Vec<&str> = risk_flags
        .iter()
        .filter(|f| f.level == RiskLevel::Contraindicated)
        .map(|f| f.message.as_str())
        .collect();
    if !contraindications.is_empty() {
        emit(
            RedFlagKind::ContraindicatedClasses,
            RedFlagSeverity::Critical,
            "Contraindicated drug classes",
            contraindications.join("; "),
            "Do not administer the contraindicated classes; confirm alternatives with prescriber or pharmacist",
        );
    }

    flags
}
