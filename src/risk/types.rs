use serde::{Deserialize, Serialize};

use crate::models::enums::{AnalgesicClass, RiskLevel};

/// A structured warning linking a clinical condition to affected drug classes.
/// One flag per matched rule plus any synthesized age flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub id: String,
    /// Catalog rule (or synthesized age rule) that produced the flag.
    pub rule_id: String,
    pub level: RiskLevel,
    pub category: String,
    pub message: String,
    pub affected_drug_classes: Vec<AnalgesicClass>,
    pub recommendation: String,
}

impl RiskFlag {
    pub fn affects(&self, class: AnalgesicClass) -> bool {
        self.affected_drug_classes.contains(&class)
    }
}

/// Combined verdict of every flag touching one drug class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSafety {
    /// Highest level among matching flags; `Info` when none match.
    pub level: RiskLevel,
    /// False only when some matching flag is contraindicated.
    pub safe: bool,
    /// Messages of every matching flag, in flag order.
    pub warnings: Vec<String>,
}

impl ClassSafety {
    /// Warnings joined for display as a dose-adjustment note.
    pub fn warning_text(&self) -> Option<String> {
        if self.warnings.is_empty() {
            None
        } else {
            Some(self.warnings.join("; "))
        }
    }
}
