use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::enums::{AnalgesicClass, Comorbidity, ComparisonOperator, ConditionLogic, RiskLevel};

// ---------------------------------------------------------------------------
// AgeCondition
// ---------------------------------------------------------------------------

/// Extra age predicate ANDed with a rule's condition match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeCondition {
    pub operator: ComparisonOperator,
    /// Age in years.
    pub value: f64,
}

impl AgeCondition {
    pub fn matches(&self, age_years: f64) -> bool {
        match self.operator {
            ComparisonOperator::Gt => age_years > self.value,
            ComparisonOperator::Lt => age_years < self.value,
            ComparisonOperator::Ge => age_years >= self.value,
            ComparisonOperator::Le => age_years <= self.value,
        }
    }
}

// ---------------------------------------------------------------------------
// RiskRule
// ---------------------------------------------------------------------------

/// One catalog entry: condition(s) -> risk level for a set of drug classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    /// Stable identifier for audit trail.
    pub id: String,
    pub conditions: Vec<Comorbidity>,
    #[serde(default = "default_logic")]
    pub condition_logic: ConditionLogic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_condition: Option<AgeCondition>,
    pub level: RiskLevel,
    pub category: String,
    pub message: String,
    pub affected_drug_classes: Vec<AnalgesicClass>,
    pub recommendation: String,
}

fn default_logic() -> ConditionLogic {
    ConditionLogic::Any
}

impl RiskRule {
    /// Evaluate the rule against the patient's condition set and age.
    pub fn matches(&self, present: &HashSet<Comorbidity>, age_years: f64) -> bool {
        let conditions_met = match self.condition_logic {
            ConditionLogic::Any => self.conditions.iter().any(|c| present.contains(c)),
            ConditionLogic::All => {
                !self.conditions.is_empty() && self.conditions.iter().all(|c| present.contains(c))
            }
        };

        conditions_met
            && self
                .age_condition
                .map_or(true, |age| age.matches(age_years))
    }

    pub fn affects(&self, class: AnalgesicClass) -> bool {
        self.affected_drug_classes.contains(&class)
    }
}

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Rule catalog load failed ({0}): {1}")]
    Load(String, String),

    #[error("Rule catalog parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Invalid rule {rule_id}: {reason}")]
    InvalidRule { rule_id: String, reason: String },

    #[error("Rule catalog is empty")]
    Empty,
}
