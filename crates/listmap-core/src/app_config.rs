use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Optional path to a selectors YAML file; when `None` the built-in
    /// default selectors apply.
    pub selectors_path: Option<PathBuf>,
    /// Quiescent window for collapsing bursts of list changes into one
    /// reconciliation pass.
    pub debounce_window_ms: u64,
    /// Initial map center before any markers exist.
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: u8,
    /// Polling interval for the `watch` command.
    pub watch_interval_ms: u64,
}
