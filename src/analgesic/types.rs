use serde::{Deserialize, Serialize};

use crate::models::enums::{AnalgesicClass, PainSeverity, ProcedureType, Route, Suitability};
use crate::models::WhoStep;

// ---------------------------------------------------------------------------
// AnalgesicRecommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalgesicRecommendation {
    pub id: String,
    pub class: AnalgesicClass,
    pub suitability: Suitability,
    pub routes: Vec<Route>,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose_adjustment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitoring_required: Vec<String>,
}

// ---------------------------------------------------------------------------
// AnalgesicPlan
// ---------------------------------------------------------------------------

/// Output of one run of the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalgesicPlan {
    pub who_step: WhoStep,
    /// WHO-ladder recommendations, in step order.
    pub primary_recommendations: Vec<AnalgesicRecommendation>,
    pub adjunct_recommendations: Vec<AnalgesicRecommendation>,
    pub contraindicated_classes: Vec<AnalgesicClass>,
    pub non_pharmacological: Vec<String>,
}

impl AnalgesicPlan {
    /// Primary then adjunct recommendations.
    pub fn all_recommendations(&self) -> impl Iterator<Item = &AnalgesicRecommendation> {
        self.primary_recommendations
            .iter()
            .chain(self.adjunct_recommendations.iter())
    }

    pub fn primary_classes(&self) -> Vec<AnalgesicClass> {
        self.primary_recommendations.iter().map(|r| r.class).collect()
    }

    pub fn find(&self, class: AnalgesicClass) -> Option<&AnalgesicRecommendation> {
        self.all_recommendations().find(|r| r.class == class)
    }

    /// No pharmacological option survived the risk checks.
    pub fn has_no_pharmacological_option(&self) -> bool {
        self.primary_recommendations.is_empty() && self.adjunct_recommendations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProceduralPainPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreEmptiveAnalgesia {
    pub timing: String,
    pub recommendations: Vec<AnalgesicRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicalAnesthesia {
    pub applicable: bool,
    pub agents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalAnesthesia {
    pub applicable: bool,
    pub techniques: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntraProcedural {
    pub systemic_options: Vec<AnalgesicRecommendation>,
    pub topical_anesthesia: TopicalAnesthesia,
    pub regional_anesthesia: RegionalAnesthesia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anxiolysis {
    pub recommended: bool,
    pub options: Vec<String>,
    /// Drug option, present when anxiolysis is recommended and no flag
    /// contraindicates anxiolytics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<AnalgesicRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralPainPlan {
    pub procedure_type: ProcedureType,
    pub anticipated_pain_level: PainSeverity,
    pub pre_emptive_analgesia: PreEmptiveAnalgesia,
    pub intra_procedural: IntraProcedural,
    pub anxiolysis: Anxiolysis,
    pub monitoring_during: Vec<String>,
    pub post_procedure_follow_up: Vec<String>,
}

impl ProceduralPainPlan {
    /// Pre-emptive, intra-procedural, then anxiolytic drug options.
    pub fn recommendations(&self) -> impl Iterator<Item = &AnalgesicRecommendation> {
        self.pre_emptive_analgesia
            .recommendations
            .iter()
            .chain(self.intra_procedural.systemic_options.iter())
            .chain(self.anxiolysis.recommendation.iter())
    }
}
