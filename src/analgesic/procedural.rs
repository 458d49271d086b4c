//! Procedural pain plans.
//!
//! The anticipated pain level comes from a fixed per-procedure table rather
//! than from the current assessment, so a plan can be drawn up before the
//! procedure starts.

use crate::ids::IdSource;
use crate::models::enums::{AgeCategory, AnalgesicClass, PainSeverity, ProcedureType, Suitability};
use crate::models::PatientInfo;
use crate::risk::{class_safety, RiskFlag};

use super::ladder::{paracetamol_suitability, recommend, strings, strong_opioid_suitability, tiered_suitability};
use super::types::{
    AnalgesicRecommendation, Anxiolysis, IntraProcedural, PreEmptiveAnalgesia, ProceduralPainPlan,
    RegionalAnesthesia, TopicalAnesthesia,
};

pub const PRE_EMPTIVE_TIMING: &str = "30-60 minutes before procedure";

const TOPICAL_PROCEDURES: &[ProcedureType] = &[
    ProcedureType::Venipuncture,
    ProcedureType::CatheterInsertion,
    ProcedureType::LumbarPuncture,
    ProcedureType::BoneMarrowBiopsy,
    ProcedureType::Suturing,
    ProcedureType::WoundDressing,
];

const REGIONAL_PROCEDURES: &[ProcedureType] = &[
    ProcedureType::Debridement,
    ProcedureType::FractureReduction,
    ProcedureType::ChestTube,
];

/// Expected pain for a procedure.
pub fn anticipated_pain_level(procedure: ProcedureType) -> PainSeverity {
    match procedure {
        ProcedureType::BurnDressing
        | ProcedureType::Debridement
        | ProcedureType::ChestTube
        | ProcedureType::BoneMarrowBiopsy => PainSeverity::Severe,
        ProcedureType::DrainRemoval | ProcedureType::CatheterInsertion => PainSeverity::Mild,
        _ => PainSeverity::Moderate,
    }
}

pub fn generate_procedural_pain_plan(
    procedure: ProcedureType,
    risk_flags: &[RiskFlag],
    patient: &PatientInfo,
    ids: &dyn IdSource,
) -> ProceduralPainPlan {
    let level = anticipated_pain_level(procedure);

    let pre_emptive_analgesia = PreEmptiveAnalgesia {
        timing: PRE_EMPTIVE_TIMING.to_string(),
        recommendations: pre_emptive(level, risk_flags, ids),
    };

    let systemic_options = intra_systemic(level, risk_flags, ids);
    let has_strong_opioid = systemic_options
        .iter()
        .any(|r| r.class == AnalgesicClass::StrongOpioid);
    let has_ketamine = systemic_options
        .iter()
        .any(|r| r.class == AnalgesicClass::Ketamine);

    let intra_procedural = IntraProcedural {
        systemic_options,
        topical_anesthesia: topical(procedure, patient),
        regional_anesthesia: regional(procedure, risk_flags),
    };

    let anxiolysis_recommended = level == PainSeverity::Severe
        || matches!(
            procedure,
            ProcedureType::BoneMarrowBiopsy | ProcedureType::LumbarPuncture
        );

    let plan = ProceduralPainPlan {
        procedure_type: procedure,
        anticipated_pain_level: level,
        pre_emptive_analgesia,
        intra_procedural,
        anxiolysis: anxiolysis(anxiolysis_recommended, risk_flags, patient, ids),
        monitoring_during: monitoring_during(has_strong_opioid, has_ketamine),
        post_procedure_follow_up: follow_up(has_strong_opioid, has_ketamine),
    };

    tracing::debug!(
        procedure = %procedure,
        level = %level,
        systemic = plan.intra_procedural.systemic_options.len(),
        "Procedural plan built"
    );

    plan
}

fn pre_emptive(
    level: PainSeverity,
    risk_flags: &[RiskFlag],
    ids: &dyn IdSource,
) -> Vec<AnalgesicRecommendation> {
    let paracetamol = class_safety(AnalgesicClass::Paracetamol, risk_flags);
    let mut recs = vec![recommend(
        AnalgesicClass::Paracetamol,
        paracetamol_suitability(&paracetamol),
        &paracetamol,
        "Baseline pre-emptive analgesia",
        ids,
    )];

    let opioid_tier = match level {
        PainSeverity::Moderate => Some(AnalgesicClass::WeakOpioid),
        PainSeverity::Severe => Some(AnalgesicClass::StrongOpioid),
        _ => None,
    };

    if let Some(class) = opioid_tier {
        let safety = class_safety(class, risk_flags);
        if safety.safe {
            let suitability = if class == AnalgesicClass::StrongOpioid {
                strong_opioid_suitability(safety.level)
            } else {
                tiered_suitability(safety.level)
            };
            recs.push(recommend(
                class,
                suitability,
                &safety,
                "Pre-emptive opioid matched to anticipated procedural pain",
                ids,
            ));
        }
    }

    recs
}

fn intra_systemic(
    level: PainSeverity,
    risk_flags: &[RiskFlag],
    ids: &dyn IdSource,
) -> Vec<AnalgesicRecommendation> {
    if level != PainSeverity::Severe {
        return Vec::new();
    }

    let mut recs = Vec::new();

    let strong = class_safety(AnalgesicClass::StrongOpioid, risk_flags);
    if strong.safe {
        recs.push(recommend(
            AnalgesicClass::StrongOpioid,
            strong_opioid_suitability(strong.level),
            &strong,
            "Short-acting IV opioid titrated during the procedure",
            ids,
        ));
    }

    for (class, rationale) in [
        (
            AnalgesicClass::Ketamine,
            "Sub-dissociative ketamine for intense procedural pain",
        ),
        (
            AnalgesicClass::NitrousOxide,
            "Inhaled nitrous oxide for rapid-onset, rapid-offset analgesia",
        ),
    ] {
        let safety = class_safety(class, risk_flags);
        if safety.safe {
            recs.push(recommend(class, Suitability::Consider, &safety, rationale, ids));
        }
    }

    recs
}

fn topical(procedure: ProcedureType, patient: &PatientInfo) -> TopicalAnesthesia {
    if !TOPICAL_PROCEDURES.contains(&procedure) {
        return TopicalAnesthesia {
            applicable: false,
            agents: Vec::new(),
            application_time: None,
        };
    }

    let mut agents = strings(&["EMLA cream (lidocaine/prilocaine)", "Lidocaine 4% cream"]);
    if procedure == ProcedureType::Venipuncture || patient.age_category() == AgeCategory::Pediatric {
        agents.push("Vapocoolant spray".into());
    }

    TopicalAnesthesia {
        applicable: true,
        agents,
        application_time: Some("Apply 30-60 minutes before procedure".into()),
    }
}

fn regional(procedure: ProcedureType, risk_flags: &[RiskFlag]) -> RegionalAnesthesia {
    if !REGIONAL_PROCEDURES.contains(&procedure) {
        return RegionalAnesthesia {
            applicable: false,
            techniques: Vec::new(),
            warnings: Vec::new(),
        };
    }

    let techniques = match procedure {
        ProcedureType::FractureReduction => strings(&["Haematoma block", "Peripheral nerve block"]),
        ProcedureType::ChestTube => strings(&["Intercostal nerve block", "Local infiltration"]),
        _ => strings(&["Peripheral nerve block", "Local infiltration"]),
    };

    RegionalAnesthesia {
        applicable: true,
        techniques,
        warnings: class_safety(AnalgesicClass::RegionalAnesthesia, risk_flags).warnings,
    }
}

fn anxiolysis(
    recommended: bool,
    risk_flags: &[RiskFlag],
    patient: &PatientInfo,
    ids: &dyn IdSource,
) -> Anxiolysis {
    if !recommended {
        return Anxiolysis {
            recommended: false,
            options: Vec::new(),
            recommendation: None,
        };
    }

    let category = patient.age_category();
    let safety = class_safety(AnalgesicClass::Anxiolytic, risk_flags);
    if !safety.safe {
        let support = match category {
            AgeCategory::Pediatric | AgeCategory::Neonate => "Child life specialist support",
            AgeCategory::Adult | AgeCategory::Elderly => "Verbal reassurance",
        };
        return Anxiolysis {
            recommended: true,
            options: strings(&[support]),
            recommendation: None,
        };
    }

    let options = match category {
        AgeCategory::Pediatric | AgeCategory::Neonate => {
            strings(&["Intranasal midazolam", "Child life specialist support"])
        }
        AgeCategory::Elderly => strings(&["Low-dose oral lorazepam", "Verbal reassurance"]),
        AgeCategory::Adult => strings(&["Oral or IV midazolam", "Verbal reassurance"]),
    };

    Anxiolysis {
        recommended: true,
        options,
        recommendation: Some(recommend(
            AnalgesicClass::Anxiolytic,
            tiered_suitability(safety.level),
            &safety,
            "Procedural anxiolysis",
            ids,
        )),
    }
}

fn monitoring_during(has_strong_opioid: bool, has_ketamine: bool) -> Vec<String> {
    let mut items = strings(&["Pain score", "Patient comfort and distress"]);
    if has_strong_opioid || has_ketamine {
        items.push("Continuous pulse oximetry".into());
        items.push("Sedation level".into());
        items.push("Respiratory rate".into());
    }
    if has_ketamine {
        items.push("Blood pressure and heart rate".into());
    }
    items
}

fn follow_up(has_strong_opioid: bool, has_ketamine: bool) -> Vec<String> {
    let mut items = strings(&["Reassess pain within 30 minutes of procedure end"]);
    if has_strong_opioid {
        items.push("Observe sedation and respiration until return to baseline".into());
    }
    if has_ketamine {
        items.push("Monitor for emergence reactions during recovery".into());
    }
    items.push("Document analgesic effectiveness for future procedures".into());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::models::enums::{AgeUnit, Gender, RiskLevel};

    fn adult() -> PatientInfo {
        PatientInfo::new("p", "AB", 40.0, AgeUnit::Years, Gender::Female)
    }

    fn classes(recs: &[AnalgesicRecommendation]) -> Vec<AnalgesicClass> {
        recs.iter().map(|r| r.class).collect()
    }

    #[test]
    fn pain_level_lookup() {
        assert_eq!(anticipated_pain_level(ProcedureType::BurnDressing), PainSeverity::Severe);
        assert_eq!(anticipated_pain_level(ProcedureType::DrainRemoval), PainSeverity::Mild);
        assert_eq!(anticipated_pain_level(ProcedureType::Suturing), PainSeverity::Moderate);
        assert_eq!(anticipated_pain_level(ProcedureType::Other), PainSeverity::Moderate);
    }

    #[test]
    fn drain_removal_is_paracetamol_only() {
        let ids = SequentialIds::new("p");
        let plan = generate_procedural_pain_plan(ProcedureType::DrainRemoval, &[], &adult(), &ids);
        assert_eq!(plan.anticipated_pain_level, PainSeverity::Mild);
        assert_eq!(
            classes(&plan.pre_emptive_analgesia.recommendations),
            vec![AnalgesicClass::Paracetamol]
        );
        assert_eq!(plan.pre_emptive_analgesia.timing, PRE_EMPTIVE_TIMING);
        assert!(!plan.anxiolysis.recommended);
        assert!(plan.intra_procedural.systemic_options.is_empty());
    }

    #[test]
    fn moderate_procedure_adds_weak_opioid() {
        let ids = SequentialIds::new("p");
        let plan = generate_procedural_pain_plan(ProcedureType::Suturing, &[], &adult(), &ids);
        assert_eq!(
            classes(&plan.pre_emptive_analgesia.recommendations),
            vec![AnalgesicClass::Paracetamol, AnalgesicClass::WeakOpioid]
        );
        assert!(plan.intra_procedural.topical_anesthesia.applicable);
        assert!(!plan.intra_procedural.regional_anesthesia.applicable);
    }

    #[test]
    fn severe_procedure_full_plan() {
        let ids = SequentialIds::new("p");
        let plan = generate_procedural_pain_plan(ProcedureType::Debridement, &[], &adult(), &ids);
        assert_eq!(
            classes(&plan.intra_procedural.systemic_options),
            vec![
                AnalgesicClass::StrongOpioid,
                AnalgesicClass::Ketamine,
                AnalgesicClass::NitrousOxide
            ]
        );
        assert_eq!(
            plan.intra_procedural.systemic_options[1].suitability,
            Suitability::Consider
        );
        assert!(plan.intra_procedural.regional_anesthesia.applicable);
        assert!(plan.anxiolysis.recommended);
        assert!(plan.monitoring_during.contains(&"Continuous pulse oximetry".to_string()));
        assert!(plan
            .post_procedure_follow_up
            .iter()
            .any(|i| i.contains("emergence")));
    }

    #[test]
    fn lumbar_puncture_gets_anxiolysis_without_severe_pain() {
        let ids = SequentialIds::new("p");
        let plan = generate_procedural_pain_plan(ProcedureType::LumbarPuncture, &[], &adult(), &ids);
        assert_eq!(plan.anticipated_pain_level, PainSeverity::Moderate);
        assert!(plan.anxiolysis.recommended);
        assert_eq!(plan.monitoring_during.len(), 2);
        let anxiolytic = plan.anxiolysis.recommendation.as_ref().unwrap();
        assert_eq!(anxiolytic.class, AnalgesicClass::Anxiolytic);
        assert_eq!(anxiolytic.suitability, Suitability::Recommended);
        assert!(plan
            .recommendations()
            .any(|r| r.class == AnalgesicClass::Anxiolytic));
    }

    #[test]
    fn anxiolytic_carries_respiratory_warning() {
        let ids = SequentialIds::new("p");
        let flags = vec![RiskFlag {
            id: "f".into(),
            rule_id: "RESP-001".into(),
            level: RiskLevel::Warning,
            category: "Respiratory".into(),
            message: "sedatives depress ventilation".into(),
            affected_drug_classes: vec![AnalgesicClass::StrongOpioid, AnalgesicClass::Anxiolytic],
            recommendation: String::new(),
        }];
        let plan = generate_procedural_pain_plan(ProcedureType::LumbarPuncture, &flags, &adult(), &ids);
        let anxiolytic = plan.anxiolysis.recommendation.unwrap();
        assert_eq!(anxiolytic.suitability, Suitability::Caution);
        assert!(anxiolytic
            .dose_adjustment
            .unwrap()
            .contains("sedatives depress ventilation"));
    }

    #[test]
    fn contraindicated_anxiolytic_leaves_only_support() {
        let ids = SequentialIds::new("p");
        let flags = vec![RiskFlag {
            id: "f".into(),
            rule_id: "T".into(),
            level: RiskLevel::Contraindicated,
            category: "Test".into(),
            message: "no benzodiazepines".into(),
            affected_drug_classes: vec![AnalgesicClass::Anxiolytic],
            recommendation: String::new(),
        }];
        let plan = generate_procedural_pain_plan(ProcedureType::LumbarPuncture, &flags, &adult(), &ids);
        assert!(plan.anxiolysis.recommended);
        assert!(plan.anxiolysis.recommendation.is_none());
        assert_eq!(plan.anxiolysis.options, vec!["Verbal reassurance".to_string()]);
    }

    #[test]
    fn no_anxiolytic_when_not_recommended() {
        let ids = SequentialIds::new("p");
        let plan = generate_procedural_pain_plan(ProcedureType::Suturing, &[], &adult(), &ids);
        assert!(plan.anxiolysis.recommendation.is_none());
    }

    #[test]
    fn contraindicated_opioid_drops_from_plan() {
        let ids = SequentialIds::new("p");
        let flags = vec![RiskFlag {
            id: "f".into(),
            rule_id: "T".into(),
            level: RiskLevel::Contraindicated,
            category: "Test".into(),
            message: "no strong opioids".into(),
            affected_drug_classes: vec![AnalgesicClass::StrongOpioid],
            recommendation: String::new(),
        }];
        let plan = generate_procedural_pain_plan(ProcedureType::ChestTube, &flags, &adult(), &ids);
        assert_eq!(
            classes(&plan.pre_emptive_analgesia.recommendations),
            vec![AnalgesicClass::Paracetamol]
        );
        assert_eq!(
            classes(&plan.intra_procedural.systemic_options),
            vec![AnalgesicClass::Ketamine, AnalgesicClass::NitrousOxide]
        );
        assert!(!plan
            .post_procedure_follow_up
            .iter()
            .any(|i| i.starts_with("Observe sedation")));
    }

    #[test]
    fn regional_warnings_come_from_flags() {
        let ids = SequentialIds::new("p");
        let flags = vec![RiskFlag {
            id: "f".into(),
            rule_id: "HEME-003".into(),
            level: RiskLevel::Warning,
            category: "Hematologic".into(),
            message: "bleeding risk with nerve blocks".into(),
            affected_drug_classes: vec![AnalgesicClass::RegionalAnesthesia],
            recommendation: String::new(),
        }];
        let plan =
            generate_procedural_pain_plan(ProcedureType::FractureReduction, &flags, &adult(), &ids);
        assert_eq!(
            plan.intra_procedural.regional_anesthesia.warnings,
            vec!["bleeding risk with nerve blocks".to_string()]
        );
    }
}
