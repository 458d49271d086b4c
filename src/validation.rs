//! Input-validation boundary.
//!
//! The engines assume validated input. Everything a caller can get wrong is
//! rejected here before any rule runs.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::enums::Comorbidity;
use crate::models::{ComorbidityEntry, PainAssessment, PatientInfo};
use crate::pipeline::PlanRequest;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Pain score {score} outside 0..={max}")]
    ScoreOutOfRange { score: u8, max: u8 },

    #[error("Pain scale maximum must be greater than zero")]
    ZeroMaxScore,

    #[error("Duplicate comorbidity: {0}")]
    DuplicateComorbidity(Comorbidity),

    #[error("Invalid patient age: {0}")]
    InvalidAge(f64),

    #[error("Patient id is empty")]
    EmptyPatientId,
}

pub fn validate_patient(patient: &PatientInfo) -> Result<(), ValidationError> {
    if patient.id.trim().is_empty() {
        return Err(ValidationError::EmptyPatientId);
    }
    if !patient.age.is_finite() || patient.age < 0.0 {
        return Err(ValidationError::InvalidAge(patient.age));
    }
    Ok(())
}

pub fn validate_assessment(assessment: &PainAssessment) -> Result<(), ValidationError> {
    if assessment.max_score == 0 {
        return Err(ValidationError::ZeroMaxScore);
    }
    if assessment.score > assessment.max_score {
        return Err(ValidationError::ScoreOutOfRange {
            score: assessment.score,
            max: assessment.max_score,
        });
    }
    Ok(())
}

/// Rejects the first repeated condition.
pub fn validate_comorbidities(entries: &[ComorbidityEntry]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.condition) {
            return Err(ValidationError::DuplicateComorbidity(entry.condition));
        }
    }
    Ok(())
}

pub fn validate_request(request: &PlanRequest) -> Result<(), ValidationError> {
    validate_patient(&request.patient)?;
    validate_assessment(&request.assessment)?;
    validate_comorbidities(&request.comorbidities)?;
    Ok(())
}

/// Collapse repeated conditions for callers that prefer deduplication over
/// rejection. The last entry for a condition wins and keeps its position.
pub fn dedup_comorbidities(entries: Vec<ComorbidityEntry>) -> Vec<ComorbidityEntry> {
    let mut seen = HashSet::new();
    let mut kept: Vec<ComorbidityEntry> = entries
        .into_iter()
        .rev()
        .filter(|e| seen.insert(e.condition))
        .collect();
    kept.reverse();
    kept
}
