use serde::{Deserialize, Serialize};

use super::enums::{AgeCategory, AgeUnit, Gender};

/// Below this age (in years) a patient is a neonate.
pub const NEONATE_UPPER_AGE_YEARS: f64 = 1.0;
/// Below this age (in years) a patient is pediatric.
pub const PEDIATRIC_UPPER_AGE_YEARS: f64 = 18.0;
/// From this age (in years) a patient is elderly.
pub const ELDERLY_LOWER_AGE_YEARS: f64 = 65.0;

impl AgeUnit {
    /// Convert an age expressed in this unit to years.
    pub fn to_years(&self, age: f64) -> f64 {
        match self {
            Self::Years => age,
            Self::Months => age / 12.0,
            Self::Weeks => age / 52.0,
            Self::Days => age / 365.0,
        }
    }
}

/// Map an age in years to its category.
pub fn derive_age_category(age_years: f64) -> AgeCategory {
    if age_years < NEONATE_UPPER_AGE_YEARS {
        AgeCategory::Neonate
    } else if age_years < PEDIATRIC_UPPER_AGE_YEARS {
        AgeCategory::Pediatric
    } else if age_years >= ELDERLY_LOWER_AGE_YEARS {
        AgeCategory::Elderly
    } else {
        AgeCategory::Adult
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PatientRecord")]
pub struct PatientInfo {
    pub id: String,
    pub initials: String,
    pub age: f64,
    #[serde(default)]
    pub age_unit: AgeUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Derived from `age`; re-derived on deserialisation, on every age change
    /// and before planning.
    #[serde(default)]
    pub category: AgeCategory,
    #[serde(default)]
    pub gender: Gender,
}

/// Wire form of [`PatientInfo`]. Any supplied `category` is discarded.
#[derive(Deserialize)]
struct PatientRecord {
    id: String,
    initials: String,
    age: f64,
    #[serde(default)]
    age_unit: AgeUnit,
    #[serde(default)]
    weight_kg: Option<f64>,
    #[serde(default)]
    gender: Gender,
}

impl From<PatientRecord> for PatientInfo {
    fn from(raw: PatientRecord) -> Self {
        let mut patient = Self::new(raw.id, raw.initials, raw.age, raw.age_unit, raw.gender);
        patient.weight_kg = raw.weight_kg;
        patient
    }
}

impl PatientInfo {
    pub fn new(
        id: impl Into<String>,
        initials: impl Into<String>,
        age: f64,
        age_unit: AgeUnit,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            initials: initials.into(),
            age,
            age_unit,
            weight_kg: None,
            category: derive_age_category(age_unit.to_years(age)),
            gender,
        }
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Change the age and re-derive the category.
    pub fn set_age(&mut self, age: f64, age_unit: AgeUnit) {
        self.age = age;
        self.age_unit = age_unit;
        self.category = derive_age_category(self.age_in_years());
    }

    /// Return the record with `category` re-derived from the current age.
    pub fn with_derived_category(mut self) -> Self {
        self.category = derive_age_category(self.age_in_years());
        self
    }

    pub fn age_in_years(&self) -> f64 {
        self.age_unit.to_years(self.age)
    }

    /// Category computed from the current age, ignoring the stored field.
    pub fn age_category(&self) -> AgeCategory {
        derive_age_category(self.age_in_years())
    }

    pub fn is_category_consistent(&self) -> bool {
        self.category == self.age_category()
    }

    /// Elderly either by category or by raw age.
    pub fn is_elderly(&self) -> bool {
        self.category == AgeCategory::Elderly || self.age_in_years() >= ELDERLY_LOWER_AGE_YEARS
    }
}
