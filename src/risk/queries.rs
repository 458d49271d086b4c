use std::collections::BTreeSet;

use crate::models::enums::{AnalgesicClass, RiskLevel};

use super::types::{ClassSafety, RiskFlag};

/// Union of affected classes across contraindicated flags.
pub fn contraindicated_classes(flags: &[RiskFlag]) -> BTreeSet<AnalgesicClass> {
    classes_at(flags, |level| level == RiskLevel::Contraindicated)
}

/// Union of affected classes across caution- and warning-level flags.
pub fn caution_classes(flags: &[RiskFlag]) -> BTreeSet<AnalgesicClass> {
    classes_at(flags, |level| {
        matches!(level, RiskLevel::Caution | RiskLevel::Warning)
    })
}

fn classes_at(flags: &[RiskFlag], keep: impl Fn(RiskLevel) -> bool) -> BTreeSet<AnalgesicClass> {
    flags
        .iter()
        .filter(|f| keep(f.level))
        .flat_map(|f| f.affected_drug_classes.iter().copied())
        .collect()
}

/// Highest risk level any flag assigns to `class`, plus every matching message.
pub fn class_safety(class: AnalgesicClass, flags: &[RiskFlag]) -> ClassSafety {
    let matching: Vec<&RiskFlag> = flags.iter().filter(|f| f.affects(class)).collect();

    let level = matching
        .iter()
        .map(|f| f.level)
        .max()
        .unwrap_or(RiskLevel::Info);

    ClassSafety {
        level,
        safe: level != RiskLevel::Contraindicated,
        warnings: matching.iter().map(|f| f.message.clone()).collect(),
    }
}

pub fn is_contraindicated(class: AnalgesicClass, flags: &[RiskFlag]) -> bool {
    flags
        .iter()
        .any(|f| f.level == RiskLevel::Contraindicated && f.affects(class))
}
