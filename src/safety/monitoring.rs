use crate::analgesic::AnalgesicRecommendation;
use crate::models::comorbidity::has_system;
use crate::models::enums::{AnalgesicClass, OrganSystem};
use crate::models::{ComorbidityEntry, PatientInfo};
use crate::risk::RiskFlag;

use super::types::{GiProtection, MonitoringBlock, MonitoringPlan};

pub const FREQ_INTENSIVE: &str = "Hourly for first 24 hours, then every 2-4 hours";
pub const FREQ_STANDARD: &str = "Every 4 hours";
pub const FREQ_RENAL_RISK: &str = "Daily";
pub const FREQ_RENAL_ROUTINE: &str = "Every 2-3 days";

/// Which drug classes the plan ends up using.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ClassPresence {
    opioids: bool,
    strong_opioids: bool,
    nsaids: bool,
    ketamine: bool,
    anxiolytics: bool,
    anticonvulsants: bool,
}

impl ClassPresence {
    fn of(recommendations: &[AnalgesicRecommendation]) -> Self {
        let has = |pred: fn(AnalgesicClass) -> bool| recommendations.iter().any(|r| pred(r.class));
        Self {
            opioids: has(|c| c.is_opioid()),
            strong_opioids: has(|c| c == AnalgesicClass::StrongOpioid),
            nsaids: has(|c| c.is_nsaid()),
            ketamine: has(|c| c == AnalgesicClass::Ketamine),
            anxiolytics: has(|c| c == AnalgesicClass::Anxiolytic),
            anticonvulsants: has(|c| c == AnalgesicClass::AdjuvantAnticonvulsant),
        }
    }

    fn intensive(&self) -> bool {
        self.strong_opioids || self.ketamine
    }
}

/// Patient-side risk booleans from comorbidities and age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PatientRisk {
    renal: bool,
    respiratory: bool,
    cardiovascular: bool,
    gi: bool,
    elderly: bool,
}

impl PatientRisk {
    fn of(patient: &PatientInfo, comorbidities: &[ComorbidityEntry]) -> Self {
        Self {
            renal: comorbidities.iter().any(|e| e.condition.is_significant_renal()),
            respiratory: has_system(comorbidities, OrganSystem::Respiratory),
            cardiovascular: has_system(comorbidities, OrganSystem::Cardiovascular),
            gi: has_system(comorbidities, OrganSystem::Gastrointestinal),
            elderly: patient.is_elderly(),
        }
    }
}

/// Derive the monitoring plan from the recommended classes and the patient's risks.
///
/// `_risk_flags` is accepted so callers pass the whole evaluation; the plan
/// is currently driven by classes and comorbidities alone.
pub fn generate_monitoring_plan(
    recommendations: &[AnalgesicRecommendation],
    _risk_flags: &[RiskFlag],
    patient: &PatientInfo,
    comorbidities: &[ComorbidityEntry],
) -> MonitoringPlan {
    let present = ClassPresence::of(recommendations);
    let risk = PatientRisk::of(patient, comorbidities);

    let plan = MonitoringPlan {
        sedation_monitoring: sedation(&present),
        respiratory_monitoring: respiratory(&present, &risk),
        cardiovascular_monitoring: cardiovascular(&present, &risk),
        renal_monitoring: renal(&present, &risk),
        gi_protection: gi_protection(&present, &risk),
        other_monitoring: other(&present, &risk),
    };

    tracing::debug!(
        recommendations = recommendations.len(),
        required_blocks = plan.required_count(),
        "Monitoring plan derived"
    );

    plan
}

fn frequency(present: &ClassPresence) -> &'static str {
    if present.intensive() {
        FREQ_INTENSIVE
    } else {
        FREQ_STANDARD
    }
}

fn sedation(present: &ClassPresence) -> MonitoringBlock {
    if !(present.opioids || present.anxiolytics || present.ketamine) {
        return MonitoringBlock::not_required();
    }
    MonitoringBlock::required(
        frequency(present),
        vec!["Sedation score (e.g. POSS or RASS)".into()],
    )
}

fn respiratory(present: &ClassPresence, risk: &PatientRisk) -> MonitoringBlock {
    if !(present.opioids || present.ketamine || risk.respiratory) {
        return MonitoringBlock::not_required();
    }
    let mut parameters = vec![
        "Respiratory rate".to_string(),
        "Oxygen saturation (SpO2)".to_string(),
    ];
    if present.strong_opioids {
        parameters.push("End-tidal CO2 (if available)".into());
    }
    MonitoringBlock::required(frequency(present), parameters)
}

fn cardiovascular(present: &ClassPresence, risk: &PatientRisk) -> MonitoringBlock {
    if !(present.nsaids || risk.cardiovascular || present.ketamine) {
        return MonitoringBlock::not_required();
    }
    let mut parameters = vec!["Blood pressure".to_string(), "Heart rate".to_string()];
    if present.ketamine {
        parameters.push("Continuous cardiac monitoring".into());
    }
    MonitoringBlock::required(frequency(present), parameters)
}

fn renal(present: &ClassPresence, risk: &PatientRisk) -> MonitoringBlock {
    if !(present.nsaids || risk.renal) {
        return MonitoringBlock::not_required();
    }
    let freq = if risk.renal {
        FREQ_RENAL_RISK
    } else {
        FREQ_RENAL_ROUTINE
    };
    MonitoringBlock::required(
        freq,
        vec![
            "Serum creatinine".into(),
            "eGFR".into(),
            "Urine output".into(),
        ],
    )
}

fn gi_protection(present: &ClassPresence, risk: &PatientRisk) -> GiProtection {
    let mut recommendations = Vec::new();
    if present.nsaids {
        recommendations.push("Proton pump inhibitor prophylaxis".to_string());
        recommendations.push("Monitor for GI symptoms (dyspepsia, melena)".to_string());
    }
    if present.opioids {
        recommendations.push("Prophylactic laxative".to_string());
        recommendations.push("Antiemetic as needed (PRN)".to_string());
    }
    GiProtection {
        required: present.nsaids || risk.gi,
        recommendations,
    }
}

fn other(present: &ClassPresence, risk: &PatientRisk) -> Vec<String> {
    let mut items = Vec::new();
    if present.opioids {
        items.push("Opioid side effects: constipation, nausea, pruritus, urinary retention".to_string());
    }
    if risk.elderly && present.strong_opioids {
        items.push("Cognitive status and falls risk assessment each shift".to_string());
    }
    if present.ketamine {
        items.push("Emergence phenomena and nystagmus".to_string());
    }
    if present.anticonvulsants {
        items.push("Dizziness and peripheral edema (gabapentinoids)".to_string());
    }
    items
}
