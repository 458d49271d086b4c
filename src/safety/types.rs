use serde::{Deserialize, Serialize};

use crate::models::enums::{RedFlagKind, RedFlagSeverity};

/// One monitoring sub-block. `required = false` blocks carry no frequency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonitoringBlock {
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

impl MonitoringBlock {
    pub fn not_required() -> Self {
        Self::default()
    }

    pub fn required(frequency: &str, parameters: Vec<String>) -> Self {
        Self {
            required: true,
            frequency: Some(frequency.to_string()),
            parameters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GiProtection {
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonitoringPlan {
    pub sedation_monitoring: MonitoringBlock,
    pub respiratory_monitoring: MonitoringBlock,
    pub cardiovascular_monitoring: MonitoringBlock,
    pub renal_monitoring: MonitoringBlock,
    pub gi_protection: GiProtection,
    pub other_monitoring: Vec<String>,
}

impl MonitoringPlan {
    /// Number of required blocks, GI protection included.
    pub fn required_count(&self) -> usize {
        [
            self.sedation_monitoring.required,
            self.respiratory_monitoring.required,
            self.cardiovascular_monitoring.required,
            self.renal_monitoring.required,
            self.gi_protection.required,
        ]
        .iter()
        .filter(|r| **r)
        .count()
    }
}

/// Actionable safety alert tied to the assessment and recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub id: String,
    pub kind: RedFlagKind,
    pub severity: RedFlagSeverity,
    pub title: String,
    pub description: String,
    pub action: String,
}

impl RedFlag {
    pub fn is_critical(&self) -> bool {
        self.severity == RedFlagSeverity::Critical
    }
}
