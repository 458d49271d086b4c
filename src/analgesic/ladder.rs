//! WHO analgesic ladder.
//!
//! The ladder is cumulative: step N proposes everything from steps 1..=N.
//! A class is dropped only when a risk flag contraindicates it; paracetamol is
//! always proposed.

use crate::ids::IdSource;
use crate::models::enums::{AnalgesicClass, PainType, RiskLevel, Route, Suitability};
use crate::models::{PainAssessment, PatientInfo, WhoStep};
use crate::risk::{class_safety, contraindicated_classes, ClassSafety, RiskFlag};

use super::adjuncts::{adjunct_recommendations, non_pharmacological};
use super::types::{AnalgesicPlan, AnalgesicRecommendation};

/// Build the full analgesic plan for an assessment.
pub fn generate_analgesic_recommendations(
    assessment: &PainAssessment,
    risk_flags: &[RiskFlag],
    patient: &PatientInfo,
    ids: &dyn IdSource,
) -> AnalgesicPlan {
    let who_step = assessment.who_step();

    AnalgesicPlan {
        who_step,
        primary_recommendations: ladder_recommendations(who_step, assessment.pain_type, risk_flags, ids),
        adjunct_recommendations: adjunct_recommendations(assessment, risk_flags, ids),
        contraindicated_classes: contraindicated_classes(risk_flags).into_iter().collect(),
        non_pharmacological: non_pharmacological(assessment, patient),
    }
}

/// Primary recommendations for a ladder step, in step order.
pub fn ladder_recommendations(
    step: WhoStep,
    pain_type: PainType,
    risk_flags: &[RiskFlag],
    ids: &dyn IdSource,
) -> Vec<AnalgesicRecommendation> {
    let mut recs = Vec::new();

    // Step 1: non-opioids
    let paracetamol = class_safety(AnalgesicClass::Paracetamol, risk_flags);
    recs.push(recommend(
        AnalgesicClass::Paracetamol,
        paracetamol_suitability(&paracetamol),
        &paracetamol,
        "First-line analgesic at every ladder step; opioid-sparing when combined",
        ids,
    ));

    if matches!(pain_type, PainType::Inflammatory | PainType::Nociceptive) {
        let nsaid = class_safety(AnalgesicClass::NsaidNonSelective, risk_flags);
        if nsaid.safe {
            recs.push(recommend(
                AnalgesicClass::NsaidNonSelective,
                tiered_suitability(nsaid.level),
                &nsaid,
                "Effective for inflammatory and nociceptive pain; use the lowest effective dose",
                ids,
            ));
        }
    }

    // Step 2: weak opioids
    if step >= WhoStep::Step2 {
        let weak = class_safety(AnalgesicClass::WeakOpioid, risk_flags);
        if weak.safe {
            recs.push(recommend(
                AnalgesicClass::WeakOpioid,
                tiered_suitability(weak.level),
                &weak,
                "Moderate pain not controlled by non-opioids alone",
                ids,
            ));
        }
    }

    // Step 3: strong opioids
    if step >= WhoStep::Step3 {
        let strong = class_safety(AnalgesicClass::StrongOpioid, risk_flags);
        if strong.safe {
            recs.push(recommend(
                AnalgesicClass::StrongOpioid,
                strong_opioid_suitability(strong.level),
                &strong,
                "Severe pain; titrate to effect alongside non-opioid analgesia",
                ids,
            ));
        }
    }

    recs
}

/// Paracetamol: recommended unless some flag contraindicates it.
pub fn paracetamol_suitability(safety: &ClassSafety) -> Suitability {
    if safety.safe {
        Suitability::Recommended
    } else {
        Suitability::Caution
    }
}

/// NSAID and weak-opioid mapping.
pub fn tiered_suitability(level: RiskLevel) -> Suitability {
    match level {
        RiskLevel::Info => Suitability::Recommended,
        RiskLevel::Caution => Suitability::Consider,
        _ => Suitability::Caution,
    }
}

/// Strong-opioid mapping. Caution-level risk still yields `Consider`: severe
/// pain keeps strong opioids on the table.
pub fn strong_opioid_suitability(level: RiskLevel) -> Suitability {
    match level {
        RiskLevel::Info => Suitability::Recommended,
        RiskLevel::Warning => Suitability::Caution,
        _ => Suitability::Consider,
    }
}

pub(super) fn recommend(
    class: AnalgesicClass,
    suitability: Suitability,
    safety: &ClassSafety,
    rationale: &str,
    ids: &dyn IdSource,
) -> AnalgesicRecommendation {
    AnalgesicRecommendation {
        id: ids.next_id(),
        class,
        suitability,
        routes: routes_for(class),
        rationale: rationale.to_string(),
        dose_adjustment: safety.warning_text(),
        monitoring_required: monitoring_for(class),
    }
}

pub(super) fn routes_for(class: AnalgesicClass) -> Vec<Route> {
    match class {
        AnalgesicClass::Paracetamol => vec![Route::Oral, Route::Intravenous, Route::Rectal],
        AnalgesicClass::NsaidNonSelective => vec![Route::Oral, Route::Intravenous, Route::Rectal],
        AnalgesicClass::NsaidCox2Selective => vec![Route::Oral],
        AnalgesicClass::WeakOpioid => vec![Route::Oral],
        AnalgesicClass::StrongOpioid => {
            vec![Route::Oral, Route::Intravenous, Route::Subcutaneous]
        }
        AnalgesicClass::AdjuvantAnticonvulsant
        | AnalgesicClass::AdjuvantAntidepressant
        | AnalgesicClass::AdjuvantMuscleRelaxant => vec![Route::Oral],
        AnalgesicClass::TopicalAnalgesic | AnalgesicClass::TopicalAnesthetic => {
            vec![Route::Topical]
        }
        AnalgesicClass::RegionalAnesthesia => vec![Route::Perineural],
        AnalgesicClass::Anxiolytic => vec![Route::Oral, Route::Intranasal, Route::Intravenous],
        AnalgesicClass::Ketamine => vec![Route::Intravenous, Route::Intramuscular, Route::Intranasal],
        AnalgesicClass::NitrousOxide => vec![Route::Inhaled],
    }
}

pub(super) fn monitoring_for(class: AnalgesicClass) -> Vec<String> {
    match class {
        AnalgesicClass::NsaidNonSelective | AnalgesicClass::NsaidCox2Selective => {
            strings(&["Renal function", "GI symptoms", "Blood pressure"])
        }
        AnalgesicClass::WeakOpioid => strings(&["Sedation", "Constipation", "Nausea"]),
        AnalgesicClass::StrongOpioid => {
            strings(&["Sedation score", "Respiratory rate", "Oxygen saturation"])
        }
        AnalgesicClass::AdjuvantAnticonvulsant => strings(&["Dizziness", "Sedation"]),
        AnalgesicClass::AdjuvantAntidepressant => strings(&["Anticholinergic effects", "Mood"]),
        AnalgesicClass::Ketamine => {
            strings(&["Blood pressure", "Heart rate", "Emergence reactions"])
        }
        AnalgesicClass::Anxiolytic | AnalgesicClass::NitrousOxide => strings(&["Sedation level"]),
        _ => Vec::new(),
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::models::enums::{AgeUnit, Gender, PainContext, PainScale};

    fn make_assessment(score: u8, pain_type: PainType) -> PainAssessment {
        PainAssessment::new(PainScale::Nrs, score, 10, pain_type, PainContext::Rest)
    }

    fn make_patient() -> PatientInfo {
        PatientInfo::new("p", "AB", 40.0, AgeUnit::Years, Gender::Male)
    }

    fn make_flag(level: RiskLevel, classes: &[AnalgesicClass], message: &str) -> RiskFlag {
        RiskFlag {
            id: message.into(),
            rule_id: "TEST".into(),
            level,
            category: "Test".into(),
            message: message.into(),
            affected_drug_classes: classes.to_vec(),
            recommendation: String::new(),
        }
    }

    #[test]
    fn mild_nociceptive_is_step_one() {
        let ids = SequentialIds::new("r");
        let plan = generate_analgesic_recommendations(
            &make_assessment(2, PainType::Nociceptive),
            &[],
            &make_patient(),
            &ids,
        );
        assert_eq!(plan.who_step, WhoStep::Step1);
        assert_eq!(
            plan.primary_classes(),
            vec![AnalgesicClass::Paracetamol, AnalgesicClass::NsaidNonSelective]
        );
    }

    #[test]
    fn neuropathic_pain_skips_nsaid() {
        let ids = SequentialIds::new("r");
        let recs = ladder_recommendations(WhoStep::Step2, PainType::Neuropathic, &[], &ids);
        let classes: Vec<_> = recs.iter().map(|r| r.class).collect();
        assert_eq!(classes, vec![AnalgesicClass::Paracetamol, AnalgesicClass::WeakOpioid]);
    }

    #[test]
    fn severe_pain_climbs_whole_ladder() {
        let ids = SequentialIds::new("r");
        let recs = ladder_recommendations(WhoStep::Step3, PainType::Inflammatory, &[], &ids);
        let classes: Vec<_> = recs.iter().map(|r| r.class).collect();
        assert_eq!(
            classes,
            vec![
                AnalgesicClass::Paracetamol,
                AnalgesicClass::NsaidNonSelective,
                AnalgesicClass::WeakOpioid,
                AnalgesicClass::StrongOpioid,
            ]
        );
        assert!(recs.iter().all(|r| r.suitability == Suitability::Recommended));
        assert!(recs.iter().all(|r| r.dose_adjustment.is_none()));
    }

    #[test]
    fn contraindicated_paracetamol_is_still_proposed_with_caution() {
        let ids = SequentialIds::new("r");
        let flags = vec![make_flag(
            RiskLevel::Contraindicated,
            &[AnalgesicClass::Paracetamol],
            "liver failure",
        )];
        let recs = ladder_recommendations(WhoStep::Step1, PainType::Ischemic, &flags, &ids);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].suitability, Suitability::Caution);
        assert_eq!(recs[0].dose_adjustment.as_deref(), Some("liver failure"));
    }

    #[test]
    fn suitability_mappings() {
        assert_eq!(tiered_suitability(RiskLevel::Info), Suitability::Recommended);
        assert_eq!(tiered_suitability(RiskLevel::Caution), Suitability::Consider);
        assert_eq!(tiered_suitability(RiskLevel::Warning), Suitability::Caution);

        assert_eq!(strong_opioid_suitability(RiskLevel::Info), Suitability::Recommended);
        assert_eq!(strong_opioid_suitability(RiskLevel::Caution), Suitability::Consider);
        assert_eq!(strong_opioid_suitability(RiskLevel::Warning), Suitability::Caution);
    }

    #[test]
    fn caution_level_opioids_are_considered() {
        let ids = SequentialIds::new("r");
        let flags = vec![make_flag(
            RiskLevel::Caution,
            &[AnalgesicClass::WeakOpioid, AnalgesicClass::StrongOpioid],
            "tolerance",
        )];
        let recs = ladder_recommendations(WhoStep::Step3, PainType::Neuropathic, &flags, &ids);
        let weak = recs.iter().find(|r| r.class == AnalgesicClass::WeakOpioid).unwrap();
        let strong = recs.iter().find(|r| r.class == AnalgesicClass::StrongOpioid).unwrap();
        assert_eq!(weak.suitability, Suitability::Consider);
        assert_eq!(strong.suitability, Suitability::Consider);
    }

    #[test]
    fn all_opioids_contraindicated_leaves_non_opioids() {
        let ids = SequentialIds::new("r");
        let flags = vec![make_flag(
            RiskLevel::Contraindicated,
            &[AnalgesicClass::WeakOpioid, AnalgesicClass::StrongOpioid],
            "no opioids",
        )];
        let plan = generate_analgesic_recommendations(
            &make_assessment(9, PainType::Nociceptive),
            &flags,
            &make_patient(),
            &ids,
        );
        assert_eq!(
            plan.primary_classes(),
            vec![AnalgesicClass::Paracetamol, AnalgesicClass::NsaidNonSelective]
        );
        assert_eq!(
            plan.contraindicated_classes,
            vec![AnalgesicClass::WeakOpioid, AnalgesicClass::StrongOpioid]
        );
    }
}
