pub mod assessment;
pub mod comorbidity;
pub mod enums;
pub mod patient;

pub use assessment::{PainAssessment, WhoStep};
pub use comorbidity::ComorbidityEntry;
pub use patient::PatientInfo;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}
