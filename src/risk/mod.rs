//! Comorbidity risk engine: catalog × patient → risk flags.

pub mod engine;
pub mod queries;
pub mod types;

pub use engine::evaluate_comorbidity_risks;
pub use queries::{caution_classes, class_safety, contraindicated_classes, is_contraindicated};
pub use types::{ClassSafety, RiskFlag};
