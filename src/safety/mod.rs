//! Safety engine: monitoring plan, red flags, escalation.

pub mod escalation;
pub mod monitoring;
pub mod red_flags;
pub mod types;

pub use escalation::{escalation_reasons, should_increase_monitoring};
pub use monitoring::generate_monitoring_plan;
pub use red_flags::generate_red_flags;
pub use types::{GiProtection, MonitoringBlock, MonitoringPlan, RedFlag};
