use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::enums::{Comorbidity, ComorbiditySeverity, OrganSystem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComorbidityEntry {
    pub condition: Comorbidity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<ComorbiditySeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ComorbidityEntry {
    pub fn new(condition: Comorbidity) -> Self {
        Self {
            condition,
            severity: None,
            notes: None,
        }
    }

    pub fn with_severity(mut self, severity: ComorbiditySeverity) -> Self {
        self.severity = Some(severity);
        self
    }
}

impl Comorbidity {
    pub fn system(&self) -> OrganSystem {
        match self {
            Self::CkdStage1To2
            | Self::CkdStage3
            | Self::CkdStage4
            | Self::CkdStage5
            | Self::AcuteKidneyInjury
            | Self::Dialysis => OrganSystem::Renal,
            Self::HepaticImpairmentMild
            | Self::HepaticImpairmentModerate
            | Self::HepaticImpairmentSevere
            | Self::ActiveAlcoholUse => OrganSystem::Hepatic,
            Self::PepticUlcer | Self::GiBleedHistory | Self::InflammatoryBowelDisease => {
                OrganSystem::Gastrointestinal
            }
            Self::HeartFailure
            | Self::CoronaryArteryDisease
            | Self::RecentCabg
            | Self::Hypertension
            | Self::StrokeHistory => OrganSystem::Cardiovascular,
            Self::Copd | Self::Asthma | Self::ObstructiveSleepApnea => OrganSystem::Respiratory,
            Self::AnticoagulantTherapy | Self::BleedingDisorder | Self::Thrombocytopenia => {
                OrganSystem::Hematologic
            }
            Self::Pregnancy | Self::PregnancyThirdTrimester | Self::Breastfeeding => {
                OrganSystem::Obstetric
            }
            Self::OpioidTolerance | Self::OpioidUseDisorder | Self::SubstanceUseDisorder => {
                OrganSystem::SubstanceUse
            }
            Self::Depression | Self::Dementia | Self::Delirium => OrganSystem::Psychiatric,
            Self::SeizureDisorder | Self::HeadInjury | Self::MyastheniaGravis => {
                OrganSystem::Neurological
            }
            Self::Diabetes => OrganSystem::Endocrine,
            Self::NsaidAllergy => OrganSystem::Immunologic,
        }
    }

    /// Renal conditions that change drug clearance or NSAID tolerance.
    /// Early CKD (stages 1-2) does not.
    pub fn is_significant_renal(&self) -> bool {
        self.system() == OrganSystem::Renal && *self != Self::CkdStage1To2
    }
}

/// Set of condition tags present in the patient.
pub fn condition_set(entries: &[ComorbidityEntry]) -> HashSet<Comorbidity> {
    entries.iter().map(|e| e.condition).collect()
}

/// Whether any entry belongs to the given organ system.
pub fn has_system(entries: &[ComorbidityEntry], system: OrganSystem) -> bool {
    entries.iter().any(|e| e.condition.system() == system)
}
