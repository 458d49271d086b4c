use std::path::PathBuf;

/// Application constants
pub const APP_NAME: &str = "Painplan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming a JSON rule catalog to use instead of the
/// built-in table.
pub const RULES_PATH_ENV: &str = "PAINPLAN_RULES";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "painplan=info,painplan_lib=info"
}

/// Rule catalog override from the environment, if set and non-empty.
pub fn rules_override_path() -> Option<PathBuf> {
    rules_path_from(std::env::var(RULES_PATH_ENV).ok())
}

fn rules_path_from(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
