use std::sync::LazyLock;

use regex::Regex;

use crate::ids::IdSource;
use crate::models::enums::{AgeCategory, AnalgesicClass, PainContext, PainType, RiskLevel, Suitability};
use crate::models::{PainAssessment, PatientInfo};
use crate::risk::{class_safety, RiskFlag};

use super::ladder::{recommend, strings, tiered_suitability};
use super::types::AnalgesicRecommendation;

/// "spasm", "spasms", "Spasmodic", ... anywhere in the description.
static RE_SPASM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)spasm").unwrap());

/// Adjuvants chosen from pain type, location and description.
/// Contraindicated adjuvants are left out.
pub fn adjunct_recommendations(
    assessment: &PainAssessment,
    risk_flags: &[RiskFlag],
    ids: &dyn IdSource,
) -> Vec<AnalgesicRecommendation> {
    let mut recs = Vec::new();

    if matches!(assessment.pain_type, PainType::Neuropathic | PainType::Mixed) {
        push_tiered(
            &mut recs,
            AnalgesicClass::AdjuvantAnticonvulsant,
            "Gabapentinoids for neuropathic pain components",
            risk_flags,
            ids,
        );
        push_tiered(
            &mut recs,
            AnalgesicClass::AdjuvantAntidepressant,
            "Tricyclic or SNRI antidepressants for neuropathic pain components",
            risk_flags,
            ids,
        );
    }

    if assessment.has_location()
        && matches!(assessment.pain_type, PainType::Nociceptive | PainType::Inflammatory)
    {
        push_tiered(
            &mut recs,
            AnalgesicClass::TopicalAnalgesic,
            "Localised pain; topical NSAID or lidocaine limits systemic exposure",
            risk_flags,
            ids,
        );
    }

    if describes_spasm(&assessment.description) {
        let safety = class_safety(AnalgesicClass::AdjuvantMuscleRelaxant, risk_flags);
        if safety.safe {
            let suitability = if safety.level == RiskLevel::Info {
                Suitability::Consider
            } else {
                Suitability::Caution
            };
            recs.push(recommend(
                AnalgesicClass::AdjuvantMuscleRelaxant,
                suitability,
                &safety,
                "Muscle spasm reported; short course only",
                ids,
            ));
        }
    }

    recs
}

fn push_tiered(
    recs: &mut Vec<AnalgesicRecommendation>,
    class: AnalgesicClass,
    rationale: &str,
    risk_flags: &[RiskFlag],
    ids: &dyn IdSource,
) {
    let safety = class_safety(class, risk_flags);
    if safety.safe {
        recs.push(recommend(class, tiered_suitability(safety.level), &safety, rationale, ids));
    }
}

pub fn describes_spasm(description: &str) -> bool {
    RE_SPASM.is_match(description)
}

/// Non-drug measures for the patient's age group and pain type.
pub fn non_pharmacological(assessment: &PainAssessment, patient: &PatientInfo) -> Vec<String> {
    let mut items = strings(&[
        "Positioning and comfort measures",
        "Relaxation and breathing techniques",
    ]);

    items.extend(match patient.age_category() {
        AgeCategory::Pediatric => strings(&[
            "Distraction techniques",
            "Play therapy",
            "Parental presence",
        ]),
        AgeCategory::Neonate => strings(&[
            "Oral sucrose",
            "Swaddling and facilitated tucking",
            "Skin-to-skin contact",
        ]),
        AgeCategory::Adult | AgeCategory::Elderly => strings(&[
            "Distraction techniques",
            "Music therapy",
            "Guided imagery",
        ]),
    });

    match assessment.pain_type {
        PainType::Nociceptive | PainType::Inflammatory
            if assessment.pain_context != PainContext::Procedural =>
        {
            items.push("Cold therapy".into());
            items.push("Heat therapy".into());
        }
        PainType::Neuropathic => {
            items.push("TENS (transcutaneous electrical nerve stimulation)".into());
        }
        _ => {}
    }

    items
}
