use crate::catalog::{RiskRule, RuleCatalog};
use crate::ids::IdSource;
use crate::models::comorbidity::condition_set;
use crate::models::enums::{AgeCategory, AnalgesicClass, RiskLevel};
use crate::models::{ComorbidityEntry, PatientInfo};

use super::types::RiskFlag;

const AGE_CATEGORY: &str = "Age";

/// Evaluate the catalog against the patient's comorbidities and age.
///
/// Flags come out in catalog order, followed by at most one age flag.
/// Every matched rule yields its own flag; nothing is merged.
pub fn evaluate_comorbidity_risks(
    comorbidities: &[ComorbidityEntry],
    patient: &PatientInfo,
    catalog: &RuleCatalog,
    ids: &dyn IdSource,
) -> Vec<RiskFlag> {
    let present = condition_set(comorbidities);
    let age_years = patient.age_in_years();

    let mut flags: Vec<RiskFlag> = catalog
        .rules()
        .iter()
        .filter(|rule| rule.matches(&present, age_years))
        .map(|rule| flag_from_rule(rule, ids))
        .collect();

    tracing::debug!(
        conditions = present.len(),
        matched = flags.len(),
        "Comorbidity rules evaluated"
    );

    flags.extend(age_flag(patient, ids));
    flags
}

fn flag_from_rule(rule: &RiskRule, ids: &dyn IdSource) -> RiskFlag {
    RiskFlag {
        id: ids.next_id(),
        rule_id: rule.id.clone(),
        level: rule.level,
        category: rule.category.clone(),
        message: rule.message.clone(),
        affected_drug_classes: rule.affected_drug_classes.clone(),
        recommendation: rule.recommendation.clone(),
    }
}

/// Synthesized age flag. Elderly, pediatric and neonate are mutually exclusive.
fn age_flag(patient: &PatientInfo, ids: &dyn IdSource) -> Option<RiskFlag> {
    let category = patient.age_category();
    let (rule_id, level, message, classes, recommendation) = if patient.is_elderly() {
        (
            "AGE-ELDERLY",
            RiskLevel::Caution,
            "Elderly patient: increased sensitivity to NSAID and opioid adverse effects",
            vec![
                AnalgesicClass::NsaidNonSelective,
                AnalgesicClass::NsaidCox2Selective,
                AnalgesicClass::WeakOpioid,
                AnalgesicClass::StrongOpioid,
            ],
            "Start low and go slow: reduce initial opioid doses by 25-50% and keep NSAID courses short with gastroprotection",
        )
    } else if category == AgeCategory::Pediatric {
        (
            "AGE-PEDIATRIC",
            RiskLevel::Caution,
            "Pediatric patient: weight-based dosing required; codeine is contraindicated under 12 years",
            vec![
                AnalgesicClass::Paracetamol,
                AnalgesicClass::NsaidNonSelective,
                AnalgesicClass::WeakOpioid,
                AnalgesicClass::StrongOpioid,
            ],
            "Calculate every dose per kg; if an opioid is needed use morphine or oxycodone rather than codeine",
        )
    } else if category == AgeCategory::Neonate {
        (
            "AGE-NEONATE",
            RiskLevel::Warning,
            "Neonate: immature hepatic and renal clearance with high sensitivity to opioid respiratory depression",
            vec![
                AnalgesicClass::NsaidNonSelective,
                AnalgesicClass::NsaidCox2Selective,
                AnalgesicClass::WeakOpioid,
                AnalgesicClass::StrongOpioid,
            ],
            "Use specialist neonatal dosing only, with continuous cardiorespiratory monitoring for any opioid",
        )
    } else {
        return None;
    };

    Some(RiskFlag {
        id: ids.next_id(),
        rule_id: rule_id.into(),
        level,
        category: AGE_CATEGORY.into(),
        message: message.into(),
        affected_drug_classes: classes,
        recommendation: recommendation.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::models::enums::{AgeUnit, Comorbidity, Gender};

    fn make_patient(age: f64) -> PatientInfo {
        PatientInfo::new("p", "AB", age, AgeUnit::Years, Gender::Female)
    }

    fn entries(conditions: &[Comorbidity]) -> Vec<ComorbidityEntry> {
        conditions.iter().copied().map(ComorbidityEntry::new).collect()
    }

    #[test]
    fn no_comorbidities_adult_has_no_flags() {
        let ids = SequentialIds::new("f");
        let flags = evaluate_comorbidity_risks(&[], &make_patient(40.0), &RuleCatalog::builtin(), &ids);
        assert!(flags.is_empty());
    }

    #[test]
    fn flags_follow_catalog_order_then_age() {
        let ids = SequentialIds::new("f");
        let flags = evaluate_comorbidity_risks(
            &entries(&[Comorbidity::Copd, Comorbidity::PepticUlcer]),
            &make_patient(72.0),
            &RuleCatalog::builtin(),
            &ids,
        );
        let rule_ids: Vec<&str> = flags.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(rule_ids, vec!["GI-001", "RESP-001", "AGE-ELDERLY"]);
    }

    #[test]
    fn every_flag_gets_a_fresh_id() {
        let ids = SequentialIds::new("f");
        let flags = evaluate_comorbidity_risks(
            &entries(&[Comorbidity::Pregnancy]),
            &make_patient(30.0),
            &RuleCatalog::builtin(),
            &ids,
        );
        assert_eq!(flags.len(), 2);
        assert_ne!(flags[0].id, flags[1].id);
    }

    #[test]
    fn age_condition_gates_rule() {
        let ids = SequentialIds::new("f");
        let catalog = RuleCatalog::builtin();
        let young = evaluate_comorbidity_risks(
            &entries(&[Comorbidity::Diabetes]),
            &make_patient(45.0),
            &catalog,
            &ids,
        );
        assert!(young.iter().all(|f| f.rule_id != "RENAL-005"));

        let older = evaluate_comorbidity_risks(
            &entries(&[Comorbidity::Diabetes]),
            &make_patient(61.0),
            &catalog,
            &ids,
        );
        assert!(older.iter().any(|f| f.rule_id == "RENAL-005"));
    }

    #[test]
    fn pediatric_and_neonate_flags() {
        let ids = SequentialIds::new("f");
        let catalog = RuleCatalog::builtin();

        let child = evaluate_comorbidity_risks(&[], &make_patient(8.0), &catalog, &ids);
        assert_eq!(child.len(), 1);
        assert_eq!(child[0].rule_id, "AGE-PEDIATRIC");
        assert_eq!(child[0].category, "Age");

        let neonate = PatientInfo::new("n", "NB", 10.0, AgeUnit::Days, Gender::Male);
        let flags = evaluate_comorbidity_risks(&[], &neonate, &catalog, &ids);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].rule_id, "AGE-NEONATE");
        assert_eq!(flags[0].level, RiskLevel::Warning);
    }

    #[test]
    fn age_flag_follows_age_not_stored_category() {
        let ids = SequentialIds::new("f");
        let catalog = RuleCatalog::builtin();

        let mut child = make_patient(8.0);
        child.category = AgeCategory::Adult;
        let flags = evaluate_comorbidity_risks(&[], &child, &catalog, &ids);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].rule_id, "AGE-PEDIATRIC");

        let parsed: PatientInfo =
            serde_json::from_str(r#"{"id":"c","initials":"AB","age":8}"#).unwrap();
        let flags = evaluate_comorbidity_risks(&[], &parsed, &catalog, &ids);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].rule_id, "AGE-PEDIATRIC");
    }

    #[test]
    fn all_logic_rule_needs_both_conditions() {
        let ids = SequentialIds::new("f");
        let catalog = RuleCatalog::builtin();
        let copd_only = evaluate_comorbidity_risks(
            &entries(&[Comorbidity::Copd]),
            &make_patient(50.0),
            &catalog,
            &ids,
        );
        assert!(copd_only.iter().all(|f| f.rule_id != "RESP-002"));

        let overlap = evaluate_comorbidity_risks(
            &entries(&[Comorbidity::Copd, Comorbidity::ObstructiveSleepApnea]),
            &make_patient(50.0),
            &catalog,
            &ids,
        );
        assert!(overlap.iter().any(|f| f.rule_id == "RESP-002"));
    }
}
