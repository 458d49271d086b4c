//! Plain-text rendering of a finished plan.
//!
//! Values are embedded verbatim; the fixed disclaimer closes every report.

use crate::analgesic::{AnalgesicRecommendation, ProceduralPainPlan};
use crate::pipeline::PainPlan;
use crate::safety::MonitoringBlock;

pub const DISCLAIMER: &str = "This plan is generated by a clinical decision-support tool from the \
information entered. It does not replace clinical judgement, does not calculate doses and does not \
check drug interactions. All recommendations must be reviewed by the responsible prescriber before use.";

const WRAP_WIDTH: usize = 90;

/// Section and bullet layout.
struct TextReport {
    out: String,
}

impl TextReport {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn section(&mut self, title: &str) {
        self.blank();
        self.line(&format!("{}:", title.to_uppercase()));
    }

    fn bullet(&mut self, text: &str) {
        for (i, line) in wrap_text(text, WRAP_WIDTH - 4).into_iter().enumerate() {
            let prefix = if i == 0 { "  · " } else { "    " };
            self.line(&format!("{prefix}{line}"));
        }
    }

    fn detail(&mut self, label: &str, text: &str) {
        for (i, line) in wrap_text(text, WRAP_WIDTH - 8).into_iter().enumerate() {
            if i == 0 {
                self.line(&format!("      {label}: {line}"));
            } else {
                self.line(&format!("        {line}"));
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

pub fn render_text(plan: &PainPlan) -> String {
    let mut r = TextReport::new();
    let patient = &plan.patient;

    r.line("PAIN MANAGEMENT PLAN");
    r.line(&format!("Generated: {}", plan.generated_at.format("%Y-%m-%d %H:%M")));
    r.line(&format!(
        "Patient: {} ({}), {} {}, {}",
        patient.initials, patient.id, patient.age, patient.age_unit, patient.category
    ));
    if let Some(weight) = patient.weight_kg {
        r.line(&format!("Weight: {weight} kg"));
    }
    r.line(&format!(
        "WHO ladder step: {}{}",
        plan.analgesia.who_step.as_u8(),
        if plan.increase_monitoring {
            " | INCREASED MONITORING"
        } else {
            ""
        }
    ));

    r.section("Risk flags");
    if plan.risk_flags.is_empty() {
        r.bullet("None identified");
    }
    for flag in &plan.risk_flags {
        r.bullet(&format!(
            "[{}] {} ({}): {}",
            flag.level.as_str().to_uppercase(),
            flag.category,
            flag.rule_id,
            flag.message
        ));
        if !flag.recommendation.is_empty() {
            r.detail("Recommendation", &flag.recommendation);
        }
    }

    r.section("Primary analgesia");
    if plan.analgesia.primary_recommendations.is_empty() {
        r.bullet("No pharmacological recommendation available");
    }
    for rec in &plan.analgesia.primary_recommendations {
        recommendation(&mut r, rec);
    }

    if !plan.analgesia.adjunct_recommendations.is_empty() {
        r.section("Adjuvants");
        for rec in &plan.analgesia.adjunct_recommendations {
            recommendation(&mut r, rec);
        }
    }

    if !plan.analgesia.contraindicated_classes.is_empty() {
        r.section("Contraindicated classes");
        for class in &plan.analgesia.contraindicated_classes {
            r.bullet(class.as_str());
        }
    }

    r.section("Non-pharmacological measures");
    for item in &plan.analgesia.non_pharmacological {
        r.bullet(item);
    }

    if let Some(procedural) = &plan.procedural {
        procedural_section(&mut r, procedural);
    }

    r.section("Monitoring");
    let m = &plan.monitoring;
    monitoring_block(&mut r, "Sedation", &m.sedation_monitoring);
    monitoring_block(&mut r, "Respiratory", &m.respiratory_monitoring);
    monitoring_block(&mut r, "Cardiovascular", &m.cardiovascular_monitoring);
    monitoring_block(&mut r, "Renal", &m.renal_monitoring);
    if m.gi_protection.required || !m.gi_protection.recommendations.is_empty() {
        r.bullet(&format!(
            "GI protection{}",
            if m.gi_protection.required { " (required)" } else { "" }
        ));
        for item in &m.gi_protection.recommendations {
            r.detail("Action", item);
        }
    }
    for item in &m.other_monitoring {
        r.bullet(item);
    }

    r.section("Red flags");
    for flag in &plan.red_flags {
        r.bullet(&format!(
            "[{}] {}",
            flag.severity.as_str().to_uppercase(),
            flag.title
        ));
        r.detail("Watch for", &flag.description);
        r.detail("Action", &flag.action);
    }

    r.blank();
    for line in wrap_text(DISCLAIMER, WRAP_WIDTH) {
        r.line(&line);
    }

    r.finish()
}

/// Procedural plan on its own, for the `procedure` command.
pub fn render_procedural_text(plan: &ProceduralPainPlan) -> String {
    let mut r = TextReport::new();
    r.line("PROCEDURAL PAIN PLAN");
    procedural_section(&mut r, plan);
    r.blank();
    for line in wrap_text(DISCLAIMER, WRAP_WIDTH) {
        r.line(&line);
    }
    r.finish()
}

fn recommendation(r: &mut TextReport, rec: &AnalgesicRecommendation) {
    let routes: Vec<&str> = rec.routes.iter().map(|route| route.as_str()).collect();
    r.bullet(&format!(
        "{} [{}] via {}",
        rec.class,
        rec.suitability,
        routes.join("/")
    ));
    r.detail("Rationale", &rec.rationale);
    if let Some(adjustment) = &rec.dose_adjustment {
        r.detail("Adjust", adjustment);
    }
    if !rec.monitoring_required.is_empty() {
        r.detail("Monitor", &rec.monitoring_required.join(", "));
    }
}

fn monitoring_block(r: &mut TextReport, label: &str, block: &MonitoringBlock) {
    if !block.required {
        return;
    }
    let frequency = block.frequency.as_deref().unwrap_or("As clinically indicated");
    r.bullet(&format!("{label}: {frequency}"));
    if !block.parameters.is_empty() {
        r.detail("Parameters", &block.parameters.join(", "));
    }
}

fn procedural_section(r: &mut TextReport, plan: &ProceduralPainPlan) {
    r.section(&format!(
        "Procedure: {} (anticipated pain {})",
        plan.procedure_type, plan.anticipated_pain_level
    ));
    r.bullet(&format!(
        "Pre-emptive analgesia, {}",
        plan.pre_emptive_analgesia.timing
    ));
    for rec in &plan.pre_emptive_analgesia.recommendations {
        recommendation(r, rec);
    }

    let intra = &plan.intra_procedural;
    if !intra.systemic_options.is_empty() {
        r.bullet("Intra-procedural systemic options");
        for rec in &intra.systemic_options {
            recommendation(r, rec);
        }
    }
    if intra.topical_anesthesia.applicable {
        r.bullet("Topical anaesthesia");
        r.detail("Agents", &intra.topical_anesthesia.agents.join(", "));
        if let Some(time) = &intra.topical_anesthesia.application_time {
            r.detail("Timing", time);
        }
    }
    if intra.regional_anesthesia.applicable {
        r.bullet("Regional anaesthesia");
        r.detail("Techniques", &intra.regional_anesthesia.techniques.join(", "));
        for warning in &intra.regional_anesthesia.warnings {
            r.detail("Warning", warning);
        }
    }
    if plan.anxiolysis.recommended {
        r.bullet("Anxiolysis recommended");
        r.detail("Options", &plan.anxiolysis.options.join(", "));
        if let Some(rec) = &plan.anxiolysis.recommendation {
            recommendation(r, rec);
        }
    }
    if !plan.monitoring_during.is_empty() {
        r.bullet("Monitoring during procedure");
        r.detail("Observe", &plan.monitoring_during.join(", "));
    }
    if !plan.post_procedure_follow_up.is_empty() {
        r.bullet("After the procedure");
        for item in &plan.post_procedure_follow_up {
            r.detail("Follow-up", item);
        }
    }
}

/// Greedy word wrap. Always returns at least one line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
