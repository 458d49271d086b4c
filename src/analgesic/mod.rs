//! Analgesic recommendation engine: assessment + risk flags → drug-class plan.

pub mod adjuncts;
pub mod ladder;
pub mod procedural;
pub mod types;

pub use adjuncts::{adjunct_recommendations, non_pharmacological};
pub use ladder::{generate_analgesic_recommendations, ladder_recommendations};
pub use procedural::{anticipated_pain_level, generate_procedural_pain_plan};
pub use types::{
    AnalgesicPlan, AnalgesicRecommendation, Anxiolysis, IntraProcedural, PreEmptiveAnalgesia,
    ProceduralPainPlan, RegionalAnesthesia, TopicalAnesthesia,
};
