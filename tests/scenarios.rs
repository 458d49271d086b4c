//! End-to-end planning scenarios through the public API.

use painplan_lib::analgesic::generate_procedural_pain_plan;
use painplan_lib::catalog::RuleCatalog;
use painplan_lib::ids::{SequentialIds, UuidIds};
use painplan_lib::models::enums::{
    AgeCategory, AgeUnit, AnalgesicClass, Comorbidity, Gender, PainContext, PainScale,
    PainSeverity, PainType, ProcedureType, RedFlagKind, RedFlagSeverity, RiskLevel, Suitability,
};
use painplan_lib::models::{ComorbidityEntry, PainAssessment, PatientInfo};
use painplan_lib::pipeline::{DefaultPlanEngine, PainPlan, PlanEngine, PlanRequest};
use painplan_lib::risk::evaluate_comorbidity_risks;
use painplan_lib::safety::should_increase_monitoring;

fn make_patient(age: f64) -> PatientInfo {
    PatientInfo::new("patient-1", "JD", age, AgeUnit::Years, Gender::Female)
}

fn make_assessment(score: u8, pain_type: PainType) -> PainAssessment {
    PainAssessment::new(PainScale::Nrs, score, 10, pain_type, PainContext::Rest)
}

fn make_request(age: f64, score: u8, comorbidities: &[Comorbidity]) -> PlanRequest {
    PlanRequest {
        patient: make_patient(age),
        assessment: make_assessment(score, PainType::Nociceptive),
        comorbidities: comorbidities.iter().copied().map(ComorbidityEntry::new).collect(),
        procedure_type: None,
    }
}

fn generate(request: &PlanRequest) -> PainPlan {
    DefaultPlanEngine::default()
        .generate(request, &SequentialIds::new("s"))
        .unwrap()
}

fn classes(plan: &PainPlan) -> Vec<AnalgesicClass> {
    plan.all_recommendations().iter().map(|r| r.class).collect()
}

#[test]
fn peptic_ulcer_excludes_nsaids_at_every_severity() {
    let ids = SequentialIds::new("a");
    let flags = evaluate_comorbidity_risks(
        &[ComorbidityEntry::new(Comorbidity::PepticUlcer)],
        &make_patient(40.0),
        &RuleCatalog::builtin(),
        &ids,
    );
    let contraindicated: Vec<_> = flags
        .iter()
        .filter(|f| f.level == RiskLevel::Contraindicated)
        .collect();
    assert_eq!(contraindicated.len(), 1);
    assert_eq!(contraindicated[0].category, "GI");
    assert_eq!(
        contraindicated[0].affected_drug_classes,
        vec![AnalgesicClass::NsaidNonSelective, AnalgesicClass::NsaidCox2Selective]
    );

    for score in 0..=10 {
        let plan = generate(&make_request(40.0, score, &[Comorbidity::PepticUlcer]));
        let present = classes(&plan);
        assert!(!present.contains(&AnalgesicClass::NsaidNonSelective), "score {score}");
        assert!(!present.contains(&AnalgesicClass::NsaidCox2Selective), "score {score}");
    }
}

#[test]
fn seventy_year_old_is_elderly_and_escalates() {
    let patient = make_patient(70.0);
    assert_eq!(patient.category, AgeCategory::Elderly);

    let flags = evaluate_comorbidity_risks(&[], &patient, &RuleCatalog::builtin(), &SequentialIds::new("b"));
    let age_flag = flags.iter().find(|f| f.category == "Age").unwrap();
    assert_eq!(age_flag.level, RiskLevel::Caution);
    for class in [
        AnalgesicClass::NsaidNonSelective,
        AnalgesicClass::NsaidCox2Selective,
        AnalgesicClass::WeakOpioid,
        AnalgesicClass::StrongOpioid,
    ] {
        assert!(age_flag.affects(class));
    }

    assert!(should_increase_monitoring(
        &make_assessment(2, PainType::Nociceptive),
        &flags,
        &patient
    ));
}

#[test]
fn severe_nociceptive_pain_climbs_the_ladder() {
    let plan = generate(&make_request(40.0, 8, &[]));

    let primary: Vec<_> = plan
        .analgesia
        .primary_recommendations
        .iter()
        .map(|r| (r.class, r.suitability))
        .collect();
    assert_eq!(
        primary,
        vec![
            (AnalgesicClass::Paracetamol, Suitability::Recommended),
            (AnalgesicClass::NsaidNonSelective, Suitability::Recommended),
            (AnalgesicClass::WeakOpioid, Suitability::Recommended),
            (AnalgesicClass::StrongOpioid, Suitability::Recommended),
        ]
    );

    let find = |kind: RedFlagKind| plan.red_flags.iter().find(|f| f.kind == kind).unwrap();
    assert_eq!(find(RedFlagKind::OpioidToxicity).severity, RedFlagSeverity::Critical);
    assert_eq!(find(RedFlagKind::EscalatingPain).severity, RedFlagSeverity::Critical);
}

#[test]
fn ckd_stage_five_adjusts_opioids_and_renal_monitoring() {
    let plan = generate(&make_request(55.0, 8, &[Comorbidity::CkdStage5]));
    let present = classes(&plan);
    assert!(!present.contains(&AnalgesicClass::NsaidNonSelective));
    assert!(!present.contains(&AnalgesicClass::NsaidCox2Selective));

    let strong = plan.analgesia.find(AnalgesicClass::StrongOpioid).unwrap();
    assert_eq!(strong.suitability, Suitability::Recommended);
    let adjustment = strong.dose_adjustment.as_deref().unwrap();
    assert!(adjustment.contains("50-75%"));
    assert!(adjustment.to_lowercase().contains("morphine"));

    assert!(plan.monitoring.renal_monitoring.required);
    assert_eq!(plan.monitoring.renal_monitoring.frequency.as_deref(), Some("Daily"));

    let aggregate = plan
        .red_flags
        .iter()
        .find(|f| f.kind == RedFlagKind::ContraindicatedClasses)
        .unwrap();
    assert!(aggregate.description.contains("NSAIDs"));
}

#[test]
fn drain_removal_needs_only_paracetamol() {
    let plan = generate_procedural_pain_plan(
        ProcedureType::DrainRemoval,
        &[],
        &make_patient(40.0),
        &SequentialIds::new("e"),
    );
    assert_eq!(plan.anticipated_pain_level, PainSeverity::Mild);
    let pre: Vec<_> = plan
        .pre_emptive_analgesia
        .recommendations
        .iter()
        .map(|r| r.class)
        .collect();
    assert_eq!(pre, vec![AnalgesicClass::Paracetamol]);
    assert!(!plan.anxiolysis.recommended);
}

#[test]
fn rerunning_yields_same_plan_with_fresh_ids() {
    let request = make_request(72.0, 9, &[Comorbidity::Copd, Comorbidity::HeartFailure]);
    let engine = DefaultPlanEngine::default();
    let first = engine.generate(&request, &UuidIds).unwrap();
    let second = engine.generate(&request, &UuidIds).unwrap();

    let tuples = |plan: &PainPlan| {
        plan.risk_flags
            .iter()
            .map(|f| {
                (
                    f.level,
                    f.category.clone(),
                    f.message.clone(),
                    f.affected_drug_classes.clone(),
                    f.recommendation.clone(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(tuples(&first), tuples(&second));
    assert_eq!(classes(&first), classes(&second));
    assert_eq!(first.monitoring, second.monitoring);
    assert_eq!(first.red_flags.len(), second.red_flags.len());
    assert_ne!(first.risk_flags[0].id, second.risk_flags[0].id);
}

#[test]
fn fully_contraindicated_tiers_still_produce_a_plan() {
    // Local catalog forbidding both NSAIDs and opioids.
    let json = r#"[
        {
            "id": "LOCAL-001",
            "conditions": ["opioid_use_disorder"],
            "level": "contraindicated",
            "category": "Substance Use",
            "message": "Opioids excluded by local policy",
            "affected_drug_classes": ["weak_opioid", "strong_opioid"],
            "recommendation": "Use non-opioid and regional techniques"
        },
        {
            "id": "LOCAL-002",
            "conditions": ["heart_failure"],
            "level": "contraindicated",
            "category": "Cardiovascular",
            "message": "NSAIDs worsen fluid retention",
            "affected_drug_classes": ["nsaid_non_selective", "nsaid_cox2_selective"],
            "recommendation": "Avoid all NSAIDs"
        }
    ]"#;
    let engine = DefaultPlanEngine::new(RuleCatalog::from_json_str("inline", json).unwrap());
    let request = make_request(
        50.0,
        9,
        &[Comorbidity::OpioidUseDisorder, Comorbidity::HeartFailure],
    );
    let plan = engine.generate(&request, &SequentialIds::new("x")).unwrap();

    assert_eq!(plan.analgesia.primary_classes(), vec![AnalgesicClass::Paracetamol]);
    assert!(!plan.monitoring.sedation_monitoring.required);
    let aggregate = plan.red_flags.last().unwrap();
    assert_eq!(aggregate.kind, RedFlagKind::ContraindicatedClasses);
    assert_eq!(
        aggregate.description,
        "Opioids excluded by local policy; NSAIDs worsen fluid retention"
    );
}

#[test]
fn request_json_round_trips_through_serde() {
    let json = r#"{
        "patient": {"id": "p-9", "initials": "MK", "age": 8, "age_unit": "months"},
        "assessment": {
            "scale_used": "flacc", "score": 6, "max_score": 10,
            "pain_type": "nociceptive", "pain_context": "procedural"
        },
        "comorbidities": [{"condition": "asthma"}],
        "procedure_type": "venipuncture"
    }"#;
    let request: PlanRequest = serde_json::from_str(json).unwrap();
    let plan = generate(&request);

    assert_eq!(plan.patient.category, AgeCategory::Neonate);
    assert!(plan
        .red_flags
        .iter()
        .any(|f| f.kind == RedFlagKind::InadequateProceduralAnalgesia));
    let procedural = plan.procedural.as_ref().unwrap();
    assert!(procedural.intra_procedural.topical_anesthesia.applicable);

    let unknown = json.replace("asthma", "broken_leg");
    assert!(serde_json::from_str::<PlanRequest>(&unknown).is_err());
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn arb_comorbidities() -> impl Strategy<Value = Vec<ComorbidityEntry>> {
        proptest::sample::subsequence(Comorbidity::ALL.to_vec(), 0..6)
            .prop_map(|tags| tags.into_iter().map(ComorbidityEntry::new).collect())
    }

    proptest! {
        /// Identical input yields identical flag tuples in the same order
        #[test]
        fn evaluation_is_idempotent(
            entries in arb_comorbidities(),
            age in 0.0f64..100.0
        ) {
            let patient = make_patient(age);
            let catalog = RuleCatalog::builtin();
            let a = evaluate_comorbidity_risks(&entries, &patient, &catalog, &SequentialIds::new("a"));
            let b = evaluate_comorbidity_risks(&entries, &patient, &catalog, &SequentialIds::new("b"));
            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b.iter()) {
                prop_assert_eq!(x.level, y.level);
                prop_assert_eq!(&x.category, &y.category);
                prop_assert_eq!(&x.message, &y.message);
                prop_assert_eq!(&x.affected_drug_classes, &y.affected_drug_classes);
                prop_assert_eq!(&x.recommendation, &y.recommendation);
                prop_assert_ne!(&x.id, &y.id);
            }
        }

        /// Severe pain proposes every class moderate pain does
        #[test]
        fn severe_covers_moderate(entries in arb_comorbidities(), age in 18.0f64..90.0) {
            let engine = DefaultPlanEngine::default();
            let mut request = PlanRequest {
                patient: make_patient(age),
                assessment: make_assessment(5, PainType::Nociceptive),
                comorbidities: entries,
                procedure_type: None,
            };
            let moderate = engine.generate(&request, &SequentialIds::new("m")).unwrap();
            request.assessment = make_assessment(9, PainType::Nociceptive);
            let severe = engine.generate(&request, &SequentialIds::new("s")).unwrap();

            let severe_classes = severe.analgesia.primary_classes();
            for class in moderate.analgesia.primary_classes() {
                prop_assert!(severe_classes.contains(&class));
            }
        }
    }
}
