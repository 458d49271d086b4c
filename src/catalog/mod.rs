//! Static comorbidity → risk rule catalog.

mod builtin;
pub mod types;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::enums::RiskLevel;

pub use builtin::builtin_rules;
pub use types::{AgeCondition, CatalogError, RiskRule};

/// Ordered, immutable rule table. Rule order is evaluation and emission order.
///
/// Serialises as a bare JSON array of rules; deserialising validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskRule>", into = "Vec<RiskRule>")]
pub struct RuleCatalog {
    rules: Vec<RiskRule>,
}

impl RuleCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Build a catalog from rules, rejecting malformed entries.
    pub fn from_rules(rules: Vec<RiskRule>) -> Result<Self, CatalogError> {
        validate_rules(&rules)?;
        Ok(Self { rules })
    }

    /// Parse a JSON array of rules.
    pub fn from_json_str(source: &str, json: &str) -> Result<Self, CatalogError> {
        let rules: Vec<RiskRule> = serde_json::from_str(json)
            .map_err(|e| CatalogError::Parse(source.to_string(), e.to_string()))?;
        Self::from_rules(rules)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(path.display().to_string(), e.to_string()))?;
        let catalog = Self::from_json_str(&path.display().to_string(), &json)?;

        tracing::info!(
            path = %path.display(),
            rules = catalog.len(),
            "Loaded rule catalog"
        );

        Ok(catalog)
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, rule_id: &str) -> Option<&RiskRule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.rules)
            .map_err(|e| CatalogError::Parse("catalog".into(), e.to_string()))
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<RiskRule>> for RuleCatalog {
    type Error = CatalogError;

    fn try_from(rules: Vec<RiskRule>) -> Result<Self, Self::Error> {
        Self::from_rules(rules)
    }
}

impl From<RuleCatalog> for Vec<RiskRule> {
    fn from(catalog: RuleCatalog) -> Self {
        catalog.rules
    }
}

fn validate_rules(rules: &[RiskRule]) -> Result<(), CatalogError> {
    if rules.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for rule in rules {
        let invalid = |reason: &str| {
            tracing::warn!(rule_id = %rule.id, reason, "Rejected catalog rule");
            CatalogError::InvalidRule {
                rule_id: rule.id.clone(),
                reason: reason.to_string(),
            }
        };

        if rule.id.trim().is_empty() {
            return Err(invalid("empty rule id"));
        }
        if !seen.insert(rule.id.as_str()) {
            return Err(invalid("duplicate rule id"));
        }
        if rule.conditions.is_empty() {
            return Err(invalid("rule has no conditions"));
        }
        if rule.affected_drug_classes.is_empty() && rule.level != RiskLevel::Info {
            return Err(invalid("non-info rule affects no drug class"));
        }
        if rule.message.trim().is_empty() {
            return Err(invalid("empty message"));
        }
        if let Some(age) = rule.age_condition {
            if !age.value.is_finite() || age.value < 0.0 {
                return Err(invalid("age condition value must be a non-negative number"));
            }
        }
    }

    Ok(())
}
