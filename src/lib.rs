pub mod analgesic; // Analgesic recommendation engine
pub mod catalog; // Comorbidity rule catalog
pub mod config;
pub mod ids;
pub mod models;
pub mod pipeline; // Plan composition
pub mod report; // Text report + disclaimer
pub mod risk; // Comorbidity risk engine
pub mod safety; // Monitoring, red flags, escalation
pub mod validation;

use tracing_subscriber::EnvFilter;

/// Initialise tracing on stderr, honouring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
