//! Built-in comorbidity risk rules.
//!
//! Evaluation order is table order, and flags are emitted in that order, so
//! rules are grouped by organ system and listed most-specific first within a
//! group. Clinical content follows BNF/WHO analgesic guidance for renal,
//! hepatic, cardiovascular and obstetric prescribing.

use crate::models::enums::{
    AnalgesicClass as A, Comorbidity as C, ComparisonOperator, ConditionLogic, RiskLevel,
};

use super::types::{AgeCondition, RiskRule};

const NSAIDS: [A; 2] = [A::NsaidNonSelective, A::NsaidCox2Selective];
const OPIOIDS: [A; 2] = [A::WeakOpioid, A::StrongOpioid];

pub fn builtin_rules() -> Vec<RiskRule> {
    vec![
        // ── Renal ───────────────────────────────────────────────
        RiskRule {
            id: "RENAL-001".into(),
            conditions: vec![C::CkdStage3],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Renal".into(),
            message: "Moderate renal impairment (CKD stage 3) increases the risk of NSAID nephrotoxicity".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Prefer paracetamol; if an NSAID is essential use the lowest dose for the shortest time and check renal function".into(),
        },
        RiskRule {
            id: "RENAL-002".into(),
            conditions: vec![C::CkdStage4, C::CkdStage5, C::AcuteKidneyInjury, C::Dialysis],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Renal".into(),
            message: "Severe renal impairment or acute kidney injury: NSAIDs may precipitate further renal decline and hyperkalaemia".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Avoid all NSAIDs, including COX-2 selective agents".into(),
        },
        RiskRule {
            id: "RENAL-003".into(),
            conditions: vec![C::CkdStage4, C::CkdStage5, C::Dialysis],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Info,
            category: "Renal".into(),
            message: "Severe renal impairment: reduce opioid dose by 50-75% and avoid morphine and codeine (active metabolite accumulation)".into(),
            affected_drug_classes: OPIOIDS.to_vec(),
            recommendation: "Prefer fentanyl, buprenorphine or hydromorphone; extend the dosing interval".into(),
        },
        RiskRule {
            id: "RENAL-004".into(),
            conditions: vec![C::CkdStage3],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Info,
            category: "Renal".into(),
            message: "Moderate renal impairment: reduce opioid dose by 25-50% and avoid repeated morphine dosing".into(),
            affected_drug_classes: OPIOIDS.to_vec(),
            recommendation: "Titrate slowly and review for accumulation (drowsiness, myoclonus)".into(),
        },
        RiskRule {
            id: "RENAL-005".into(),
            conditions: vec![C::Diabetes],
            condition_logic: ConditionLogic::Any,
            age_condition: Some(AgeCondition {
                operator: ComparisonOperator::Ge,
                value: 60.0,
            }),
            level: RiskLevel::Caution,
            category: "Renal".into(),
            message: "Diabetes over age 60 increases NSAID-associated acute kidney injury risk".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Check baseline creatinine before NSAID use and keep the course short".into(),
        },
        // ── Hepatic ─────────────────────────────────────────────
        RiskRule {
            id: "HEPATIC-001".into(),
            conditions: vec![C::HepaticImpairmentMild, C::HepaticImpairmentModerate],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Hepatic".into(),
            message: "Hepatic impairment reduces paracetamol clearance".into(),
            affected_drug_classes: vec![A::Paracetamol],
            recommendation: "Limit paracetamol to 2-3 g/day".into(),
        },
        RiskRule {
            id: "HEPATIC-002".into(),
            conditions: vec![C::HepaticImpairmentSevere],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Hepatic".into(),
            message: "Severe hepatic impairment: increased risk of paracetamol hepatotoxicity".into(),
            affected_drug_classes: vec![A::Paracetamol],
            recommendation: "Maximum 2 g/day paracetamol with liver function monitoring".into(),
        },
        RiskRule {
            id: "HEPATIC-003".into(),
            conditions: vec![C::HepaticImpairmentSevere],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Hepatic".into(),
            message: "Severe hepatic impairment: NSAIDs increase bleeding and hepatorenal syndrome risk".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Avoid NSAIDs".into(),
        },
        RiskRule {
            id: "HEPATIC-004".into(),
            conditions: vec![C::HepaticImpairmentModerate, C::HepaticImpairmentSevere],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Hepatic".into(),
            message: "Hepatic impairment prolongs opioid half-life and may precipitate encephalopathy".into(),
            affected_drug_classes: OPIOIDS.to_vec(),
            recommendation: "Reduce the dose and extend the interval; avoid codeine and tramadol".into(),
        },
        RiskRule {
            id: "HEPATIC-005".into(),
            conditions: vec![C::ActiveAlcoholUse],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Hepatic".into(),
            message: "Chronic alcohol use depletes glutathione and increases paracetamol toxicity".into(),
            affected_drug_classes: vec![A::Paracetamol],
            recommendation: "Limit paracetamol to 2 g/day".into(),
        },
        // ── Gastrointestinal ────────────────────────────────────
        RiskRule {
            id: "GI-001".into(),
            conditions: vec![C::PepticUlcer, C::GiBleedHistory],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "GI".into(),
            message: "Peptic ulcer or previous GI bleeding: high risk of NSAID-induced bleeding".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Avoid NSAIDs; use paracetamol and opioid-based analgesia".into(),
        },
        RiskRule {
            id: "GI-002".into(),
            conditions: vec![C::InflammatoryBowelDisease],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "GI".into(),
            message: "NSAIDs may trigger inflammatory bowel disease flares".into(),
            affected_drug_classes: vec![A::NsaidNonSelective],
            recommendation: "Avoid regular NSAID use; discuss with gastroenterology".into(),
        },
        // ── Cardiovascular ──────────────────────────────────────
        RiskRule {
            id: "CV-001".into(),
            conditions: vec![C::HeartFailure],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Cardiovascular".into(),
            message: "Heart failure: NSAIDs cause fluid retention and decompensation".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Avoid NSAIDs".into(),
        },
        RiskRule {
            id: "CV-002".into(),
            conditions: vec![C::RecentCabg],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Cardiovascular".into(),
            message: "Recent CABG: NSAIDs and COX-2 inhibitors increase thrombotic events".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Avoid NSAIDs in the post-operative period".into(),
        },
        RiskRule {
            id: "CV-003".into(),
            conditions: vec![C::CoronaryArteryDisease, C::StrokeHistory],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Cardiovascular".into(),
            message: "Established cardiovascular disease: NSAIDs increase thrombotic risk".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Prefer naproxen or low-dose ibuprofen for the shortest course; avoid COX-2 inhibitors".into(),
        },
        RiskRule {
            id: "CV-004".into(),
            conditions: vec![C::Hypertension],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Cardiovascular".into(),
            message: "NSAIDs may raise blood pressure and blunt antihypertensive therapy".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Monitor blood pressure during NSAID therapy".into(),
        },
        // ── Respiratory ─────────────────────────────────────────
        RiskRule {
            id: "RESP-001".into(),
            conditions: vec![C::Copd, C::ObstructiveSleepApnea],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Respiratory".into(),
            message: "Reduced respiratory reserve increases the risk of opioid-induced respiratory depression".into(),
            affected_drug_classes: vec![A::WeakOpioid, A::StrongOpioid, A::Anxiolytic],
            recommendation: "Start low, titrate slowly and use continuous pulse oximetry".into(),
        },
        RiskRule {
            id: "RESP-002".into(),
            conditions: vec![C::Copd, C::ObstructiveSleepApnea],
            condition_logic: ConditionLogic::All,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Respiratory".into(),
            message: "COPD with obstructive sleep apnoea (overlap syndrome): high risk of nocturnal hypoventilation with sedatives".into(),
            affected_drug_classes: vec![A::Anxiolytic, A::StrongOpioid, A::Ketamine],
            recommendation: "Avoid combining sedatives with opioids; consider CPAP and capnography overnight".into(),
        },
        RiskRule {
            id: "RESP-003".into(),
            conditions: vec![C::Asthma],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Respiratory".into(),
            message: "Asthma: risk of NSAID-exacerbated respiratory disease".into(),
            affected_drug_classes: vec![A::NsaidNonSelective],
            recommendation: "Use only if NSAIDs have been tolerated previously".into(),
        },
        RiskRule {
            id: "ALLERGY-001".into(),
            conditions: vec![C::NsaidAllergy],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Allergy".into(),
            message: "Documented NSAID hypersensitivity".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Do not administer NSAIDs".into(),
        },
        // ── Hematologic ─────────────────────────────────────────
        RiskRule {
            id: "HEME-001".into(),
            conditions: vec![C::AnticoagulantTherapy, C::BleedingDisorder, C::Thrombocytopenia],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Hematologic".into(),
            message: "Increased bleeding risk with the antiplatelet effect of non-selective NSAIDs".into(),
            affected_drug_classes: vec![A::NsaidNonSelective],
            recommendation: "Avoid non-selective NSAIDs".into(),
        },
        RiskRule {
            id: "HEME-002".into(),
            conditions: vec![C::AnticoagulantTherapy, C::BleedingDisorder, C::Thrombocytopenia],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Hematologic".into(),
            message: "COX-2 inhibitors have little antiplatelet effect but still raise bleeding risk with anticoagulants".into(),
            affected_drug_classes: vec![A::NsaidCox2Selective],
            recommendation: "Use only with gastroprotection and bleeding surveillance".into(),
        },
        RiskRule {
            id: "HEME-003".into(),
            conditions: vec![C::AnticoagulantTherapy, C::BleedingDisorder, C::Thrombocytopenia],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Hematologic".into(),
            message: "Regional anaesthesia requires coagulation assessment before needle placement".into(),
            affected_drug_classes: vec![A::RegionalAnesthesia],
            recommendation: "Check platelet count, INR and anticoagulant timing before any neuraxial or deep block".into(),
        },
        // ── Pregnancy & lactation ───────────────────────────────
        RiskRule {
            id: "PREG-001".into(),
            conditions: vec![C::PregnancyThirdTrimester],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Contraindicated,
            category: "Pregnancy".into(),
            message: "Third trimester: NSAIDs risk premature closure of the ductus arteriosus and oligohydramnios".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Do not use NSAIDs in the third trimester".into(),
        },
        RiskRule {
            id: "PREG-002".into(),
            conditions: vec![C::Pregnancy, C::PregnancyThirdTrimester],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Pregnancy".into(),
            message: "Opioid exposure in pregnancy risks neonatal abstinence syndrome and respiratory depression at delivery".into(),
            affected_drug_classes: OPIOIDS.to_vec(),
            recommendation: "Use the lowest effective dose for the shortest time and inform the obstetric team".into(),
        },
        RiskRule {
            id: "PREG-003".into(),
            conditions: vec![C::Pregnancy],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Pregnancy".into(),
            message: "NSAIDs should be avoided after 20 weeks of gestation".into(),
            affected_drug_classes: NSAIDS.to_vec(),
            recommendation: "Confirm gestational age before any NSAID use".into(),
        },
        RiskRule {
            id: "PREG-004".into(),
            conditions: vec![C::Breastfeeding],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Lactation".into(),
            message: "Codeine and tramadol: ultra-rapid metabolisers can expose breastfed infants to toxic levels".into(),
            affected_drug_classes: vec![A::WeakOpioid],
            recommendation: "Avoid codeine; observe the infant for drowsiness if opioids are used".into(),
        },
        // ── Opioid history ──────────────────────────────────────
        RiskRule {
            id: "OPIOID-001".into(),
            conditions: vec![C::OpioidUseDisorder, C::SubstanceUseDisorder],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Opioid History".into(),
            message: "History of substance or opioid use disorder: risk of relapse and misuse".into(),
            affected_drug_classes: OPIOIDS.to_vec(),
            recommendation: "Maximise non-opioid and regional techniques, continue maintenance therapy and involve the addiction team".into(),
        },
        RiskRule {
            id: "OPIOID-002".into(),
            conditions: vec![C::OpioidTolerance],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Opioid History".into(),
            message: "Opioid tolerance: higher doses may be required and weak opioids are often ineffective".into(),
            affected_drug_classes: OPIOIDS.to_vec(),
            recommendation: "Continue the baseline opioid and calculate breakthrough doses from it".into(),
        },
        // ── Psychiatric ─────────────────────────────────────────
        RiskRule {
            id: "PSYCH-001".into(),
            conditions: vec![C::Depression],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Psychiatric".into(),
            message: "Serotonergic antidepressants with tramadol risk serotonin syndrome".into(),
            affected_drug_classes: vec![A::WeakOpioid, A::AdjuvantAntidepressant],
            recommendation: "Review current antidepressant therapy before adding tramadol or an adjuvant antidepressant".into(),
        },
        RiskRule {
            id: "PSYCH-002".into(),
            conditions: vec![C::Dementia, C::Delirium],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Psychiatric".into(),
            message: "Cognitive impairment increases the risk of opioid- and sedative-induced delirium".into(),
            affected_drug_classes: vec![A::StrongOpioid, A::Anxiolytic, A::AdjuvantAnticonvulsant],
            recommendation: "Use an observational pain scale, start at reduced doses and screen for delirium daily".into(),
        },
        // ── Neurological ────────────────────────────────────────
        RiskRule {
            id: "NEURO-001".into(),
            conditions: vec![C::SeizureDisorder],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Neurological".into(),
            message: "Tramadol and pethidine lower the seizure threshold".into(),
            affected_drug_classes: vec![A::WeakOpioid],
            recommendation: "Avoid tramadol; prefer alternative opioids".into(),
        },
        RiskRule {
            id: "NEURO-002".into(),
            conditions: vec![C::HeadInjury],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Warning,
            category: "Neurological".into(),
            message: "Opioids and sedatives may mask neurological deterioration and raise intracranial pressure via hypercapnia".into(),
            affected_drug_classes: vec![A::WeakOpioid, A::StrongOpioid, A::Anxiolytic],
            recommendation: "Use short-acting agents with frequent neurological observations".into(),
        },
        RiskRule {
            id: "NEURO-003".into(),
            conditions: vec![C::MyastheniaGravis],
            condition_logic: ConditionLogic::Any,
            age_condition: None,
            level: RiskLevel::Caution,
            category: "Neurological".into(),
            message: "Myasthenia gravis: respiratory muscle weakness heightens sensitivity to opioids and muscle relaxants".into(),
            affected_drug_classes: vec![A::StrongOpioid, A::AdjuvantMuscleRelaxant],
            recommendation: "Reduce doses and monitor respiratory function closely".into(),
        },
    ]
}
