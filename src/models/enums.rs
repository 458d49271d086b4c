use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variant order is significant: derived `Ord` follows declaration order.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Pre-existing condition that changes analgesic safety.
    Comorbidity {
        CkdStage1To2 => "ckd_stage_1_2",
        CkdStage3 => "ckd_stage_3",
        CkdStage4 => "ckd_stage_4",
        CkdStage5 => "ckd_stage_5",
        AcuteKidneyInjury => "acute_kidney_injury",
        Dialysis => "dialysis",
        HepaticImpairmentMild => "hepatic_impairment_mild",
        HepaticImpairmentModerate => "hepatic_impairment_moderate",
        HepaticImpairmentSevere => "hepatic_impairment_severe",
        ActiveAlcoholUse => "active_alcohol_use",
        PepticUlcer => "peptic_ulcer",
        GiBleedHistory => "gi_bleed_history",
        InflammatoryBowelDisease => "inflammatory_bowel_disease",
        HeartFailure => "heart_failure",
        CoronaryArteryDisease => "coronary_artery_disease",
        RecentCabg => "recent_cabg",
        Hypertension => "hypertension",
        StrokeHistory => "stroke_history",
        Copd => "copd",
        Asthma => "asthma",
        ObstructiveSleepApnea => "obstructive_sleep_apnea",
        AnticoagulantTherapy => "anticoagulant_therapy",
        BleedingDisorder => "bleeding_disorder",
        Thrombocytopenia => "thrombocytopenia",
        Pregnancy => "pregnancy",
        PregnancyThirdTrimester => "pregnancy_third_trimester",
        Breastfeeding => "breastfeeding",
        OpioidTolerance => "opioid_tolerance",
        OpioidUseDisorder => "opioid_use_disorder",
        SubstanceUseDisorder => "substance_use_disorder",
        Depression => "depression",
        Dementia => "dementia",
        Delirium => "delirium",
        SeizureDisorder => "seizure_disorder",
        HeadInjury => "head_injury",
        MyastheniaGravis => "myasthenia_gravis",
        Diabetes => "diabetes",
        NsaidAllergy => "nsaid_allergy",
    }
);

str_enum!(ComorbiditySeverity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(
    /// Organ system a comorbidity belongs to.
    OrganSystem {
        Renal => "renal",
        Hepatic => "hepatic",
        Gastrointestinal => "gastrointestinal",
        Cardiovascular => "cardiovascular",
        Respiratory => "respiratory",
        Hematologic => "hematologic",
        Obstetric => "obstetric",
        SubstanceUse => "substance_use",
        Psychiatric => "psychiatric",
        Neurological => "neurological",
        Endocrine => "endocrine",
        Immunologic => "immunologic",
    }
);

str_enum!(
    /// Drug category the engines reason about. Ordered by WHO ladder step,
    /// then adjuvants, then procedural agents.
    AnalgesicClass {
        Paracetamol => "paracetamol",
        NsaidNonSelective => "nsaid_non_selective",
        NsaidCox2Selective => "nsaid_cox2_selective",
        WeakOpioid => "weak_opioid",
        StrongOpioid => "strong_opioid",
        AdjuvantAnticonvulsant => "adjuvant_anticonvulsant",
        AdjuvantAntidepressant => "adjuvant_antidepressant",
        AdjuvantMuscleRelaxant => "adjuvant_muscle_relaxant",
        TopicalAnalgesic => "topical_analgesic",
        TopicalAnesthetic => "topical_anesthetic",
        RegionalAnesthesia => "regional_anesthesia",
        Anxiolytic => "anxiolytic",
        Ketamine => "ketamine",
        NitrousOxide => "nitrous_oxide",
    }
);

impl AnalgesicClass {
    pub fn is_opioid(&self) -> bool {
        matches!(self, Self::WeakOpioid | Self::StrongOpioid)
    }

    pub fn is_nsaid(&self) -> bool {
        matches!(self, Self::NsaidNonSelective | Self::NsaidCox2Selective)
    }
}

str_enum!(
    /// Ordered: none < mild < moderate < severe.
    #[derive(Default)]
    PainSeverity {
        #[default]
        None => "none",
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
    }
);

str_enum!(PainType {
    Nociceptive => "nociceptive",
    Neuropathic => "neuropathic",
    Inflammatory => "inflammatory",
    Ischemic => "ischemic",
    Mixed => "mixed",
});

str_enum!(PainContext {
    Rest => "rest",
    Movement => "movement",
    Procedural => "procedural",
});

str_enum!(PainScale {
    Nrs => "nrs",
    Vas => "vas",
    WongBakerFaces => "wong_baker_faces",
    Flacc => "flacc",
    Cries => "cries",
    Nips => "nips",
});

str_enum!(
    #[derive(Default)]
    AgeCategory {
        Neonate => "neonate",
        Pediatric => "pediatric",
        #[default]
        Adult => "adult",
        Elderly => "elderly",
    }
);

str_enum!(
    #[derive(Default)]
    AgeUnit {
        #[default]
        Years => "years",
        Months => "months",
        Weeks => "weeks",
        Days => "days",
    }
);

str_enum!(
    #[derive(Default)]
    Gender {
        Male => "male",
        Female => "female",
        Other => "other",
        #[default]
        Unknown => "unknown",
    }
);

str_enum!(
    /// Total order: info < caution < warning < contraindicated.
    RiskLevel {
        Info => "info",
        Caution => "caution",
        Warning => "warning",
        Contraindicated => "contraindicated",
    }
);

str_enum!(ConditionLogic {
    Any => "any",
    All => "all",
});

str_enum!(ComparisonOperator {
    Gt => ">",
    Lt => "<",
    Ge => ">=",
    Le => "<=",
});

str_enum!(Suitability {
    Recommended => "recommended",
    Consider => "consider",
    Caution => "caution",
    Avoid => "avoid",
    Contraindicated => "contraindicated",
});

str_enum!(Route {
    Oral => "oral",
    Intravenous => "iv",
    Intramuscular => "im",
    Subcutaneous => "sc",
    Rectal => "rectal",
    Topical => "topical",
    Transdermal => "transdermal",
    Inhaled => "inhaled",
    Intranasal => "intranasal",
    Perineural => "perineural",
});

str_enum!(RedFlagSeverity {
    Warning => "warning",
    Critical => "critical",
});

str_enum!(RedFlagKind {
    EscalatingPain => "escalating_pain",
    SeverePain => "severe_pain",
    OpioidToxicity => "opioid_toxicity",
    ElderlyOpioidSensitivity => "elderly_opioid_sensitivity",
    NsaidAdverseEffects => "nsaid_adverse_effects",
    InadequateProceduralAnalgesia => "inadequate_procedural_analgesia",
    ContraindicatedClasses => "contraindicated_classes",
});

str_enum!(ProcedureType {
    BurnDressing => "burn_dressing",
    Debridement => "debridement",
    ChestTube => "chest_tube",
    BoneMarrowBiopsy => "bone_marrow_biopsy",
    DrainRemoval => "drain_removal",
    CatheterInsertion => "catheter_insertion",
    LumbarPuncture => "lumbar_puncture",
    WoundDressing => "wound_dressing",
    Suturing => "suturing",
    Venipuncture => "venipuncture",
    FractureReduction => "fracture_reduction",
    Other => "other",
});

impl ProcedureType {
    /// Parse a free-text procedure tag, mapping anything unknown to `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().to_lowercase().parse().unwrap_or(Self::Other)
    }
}
