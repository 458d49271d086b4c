use serde::{Deserialize, Serialize};

use super::enums::{PainContext, PainScale, PainSeverity, PainType};

/// Upper bound of the reference 0-10 scale the severity thresholds apply to.
pub const REFERENCE_MAX_SCORE: u8 = 10;
const MILD_UPPER: u8 = 3;
const MODERATE_UPPER: u8 = 6;

/// Step on the WHO analgesic ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhoStep {
    /// Non-opioid analgesics.
    Step1,
    /// Adds weak opioids.
    Step2,
    /// Adds strong opioids.
    Step3,
}

impl WhoStep {
    pub fn for_severity(severity: PainSeverity) -> Self {
        match severity {
            PainSeverity::None | PainSeverity::Mild => Self::Step1,
            PainSeverity::Moderate => Self::Step2,
            PainSeverity::Severe => Self::Step3,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Step1 => 1,
            Self::Step2 => 2,
            Self::Step3 => 3,
        }
    }
}

/// Rescale a score onto 0-10. Scores already on a 10-point scale are unchanged.
pub fn normalized_score(score: u8, max_score: u8) -> u8 {
    if max_score == REFERENCE_MAX_SCORE || max_score == 0 {
        return score.min(REFERENCE_MAX_SCORE);
    }
    let scaled = f32::from(score) * f32::from(REFERENCE_MAX_SCORE) / f32::from(max_score);
    (scaled.round() as u8).min(REFERENCE_MAX_SCORE)
}

/// Fixed thresholds: 0 none, 1-3 mild, 4-6 moderate, 7-10 severe.
pub fn severity_from_score(score: u8, max_score: u8) -> PainSeverity {
    match normalized_score(score, max_score) {
        0 => PainSeverity::None,
        s if s <= MILD_UPPER => PainSeverity::Mild,
        s if s <= MODERATE_UPPER => PainSeverity::Moderate,
        _ => PainSeverity::Severe,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainAssessment {
    pub scale_used: PainScale,
    pub score: u8,
    pub max_score: u8,
    /// Derived from `score`; recomputed before planning.
    #[serde(default)]
    pub severity: PainSeverity,
    pub pain_type: PainType,
    pub pain_context: PainContext,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl PainAssessment {
    pub fn new(
        scale_used: PainScale,
        score: u8,
        max_score: u8,
        pain_type: PainType,
        pain_context: PainContext,
    ) -> Self {
        Self {
            scale_used,
            score,
            max_score,
            severity: severity_from_score(score, max_score),
            pain_type,
            pain_context,
            location: String::new(),
            description: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Re-derive `severity` from `score`.
    pub fn recompute_severity(&mut self) {
        self.severity = severity_from_score(self.score, self.max_score);
    }

    pub fn who_step(&self) -> WhoStep {
        WhoStep::for_severity(self.severity)
    }

    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }
}
