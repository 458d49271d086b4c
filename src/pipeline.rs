//! Plan composition: risk → analgesia → (procedure) → monitoring → red flags.
//!
//! Engines hold no state between calls. The caller owns the request and the
//! resulting plan; the engine only owns the rule catalog.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analgesic::{
    generate_analgesic_recommendations, generate_procedural_pain_plan, AnalgesicPlan,
    AnalgesicRecommendation, ProceduralPainPlan,
};
use crate::catalog::{CatalogError, RuleCatalog};
use crate::ids::IdSource;
use crate::models::enums::ProcedureType;
use crate::models::{ComorbidityEntry, PainAssessment, PatientInfo};
use crate::risk::{evaluate_comorbidity_risks, RiskFlag};
use crate::safety::{
    generate_monitoring_plan, generate_red_flags, should_increase_monitoring, MonitoringPlan,
    RedFlag,
};
use crate::validation::{validate_comorbidities, validate_patient, validate_request, ValidationError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rule catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// Everything the input boundary supplies for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub patient: PatientInfo,
    pub assessment: PainAssessment,
    #[serde(default)]
    pub comorbidities: Vec<ComorbidityEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_type: Option<ProcedureType>,
}

/// One complete, freshly computed plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainPlan {
    /// Patient as evaluated, with category re-derived from age.
    pub patient: PatientInfo,
    pub risk_flags: Vec<RiskFlag>,
    pub analgesia: AnalgesicPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedural: Option<ProceduralPainPlan>,
    pub monitoring: MonitoringPlan,
    pub red_flags: Vec<RedFlag>,
    pub increase_monitoring: bool,
    pub generated_at: NaiveDateTime,
}

impl PainPlan {
    /// Every drug recommendation in the plan: primary, adjunct, then the
    /// procedural pre-emptive, intra-procedural and anxiolytic options.
    pub fn all_recommendations(&self) -> Vec<&AnalgesicRecommendation> {
        let mut recs: Vec<&AnalgesicRecommendation> = self.analgesia.all_recommendations().collect();
        if let Some(procedural) = &self.procedural {
            recs.extend(procedural.recommendations());
        }
        recs
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub trait PlanEngine {
    /// Validate the request and build the full plan.
    fn generate(&self, request: &PlanRequest, ids: &dyn IdSource) -> Result<PainPlan, PlanError>;

    /// Procedural plan only, using the patient's risk flags.
    fn procedural(
        &self,
        procedure: ProcedureType,
        patient: &PatientInfo,
        comorbidities: &[ComorbidityEntry],
        ids: &dyn IdSource,
    ) -> Result<ProceduralPainPlan, PlanError>;
}

pub struct DefaultPlanEngine {
    catalog: RuleCatalog,
}

impl DefaultPlanEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Engine over a catalog loaded from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, PlanError> {
        Ok(Self::new(RuleCatalog::load(path)?))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Run the engines in order over already-validated input.
    fn compose(
        &self,
        patient: PatientInfo,
        assessment: &PainAssessment,
        comorbidities: &[ComorbidityEntry],
        procedure: Option<ProcedureType>,
        ids: &dyn IdSource,
    ) -> PainPlan {
        let risk_flags = evaluate_comorbidity_risks(comorbidities, &patient, &self.catalog, ids);
        let analgesia = generate_analgesic_recommendations(assessment, &risk_flags, &patient, ids);
        let procedural =
            procedure.map(|p| generate_procedural_pain_plan(p, &risk_flags, &patient, ids));

        let mut recommendations: Vec<AnalgesicRecommendation> =
            analgesia.all_recommendations().cloned().collect();
        if let Some(plan) = &procedural {
            recommendations.extend(plan.recommendations().cloned());
        }

        let monitoring = generate_monitoring_plan(&recommendations, &risk_flags, &patient, comorbidities);
        let red_flags = generate_red_flags(assessment, &recommendations, &risk_flags, &patient, ids);
        let increase_monitoring = should_increase_monitoring(assessment, &risk_flags, &patient);

        PainPlan {
            patient,
            risk_flags,
            analgesia,
            procedural,
            monitoring,
            red_flags,
            increase_monitoring,
            generated_at: chrono::Local::now().naive_local(),
        }
    }
}

impl Default for DefaultPlanEngine {
    fn default() -> Self {
        Self::new(RuleCatalog::builtin())
    }
}

impl PlanEngine for DefaultPlanEngine {
    fn generate(&self, request: &PlanRequest, ids: &dyn IdSource) -> Result<PainPlan, PlanError> {
        validate_request(request)?;

        let span = tracing::info_span!("pain_plan", patient_id = %request.patient.id);
        let _guard = span.enter();
        let start = Instant::now();

        let patient = request.patient.clone().with_derived_category();
        let mut assessment = request.assessment.clone();
        assessment.recompute_severity();

        let plan = self.compose(
            patient,
            &assessment,
            &request.comorbidities,
            request.procedure_type,
            ids,
        );

        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            category = %plan.patient.category,
            severity = %assessment.severity,
            risk_flags = plan.risk_flags.len(),
            recommendations = plan.all_recommendations().len(),
            red_flags = plan.red_flags.len(),
            increase_monitoring = plan.increase_monitoring,
            processing_ms = processing_time_ms,
            "Pain plan generated"
        );

        Ok(plan)
    }

    fn procedural(
        &self,
        procedure: ProcedureType,
        patient: &PatientInfo,
        comorbidities: &[ComorbidityEntry],
        ids: &dyn IdSource,
    ) -> Result<ProceduralPainPlan, PlanError> {
        validate_patient(patient)?;
        validate_comorbidities(comorbidities)?;

        let patient = patient.clone().with_derived_category();
        let risk_flags = evaluate_comorbidity_risks(comorbidities, &patient, &self.catalog, ids);
        let plan = generate_procedural_pain_plan(procedure, &risk_flags, &patient, ids);

        tracing::info!(
            procedure = %procedure,
            level = %plan.anticipated_pain_level,
            risk_flags = risk_flags.len(),
            "Procedural plan generated"
        );

        Ok(plan)
    }
}
