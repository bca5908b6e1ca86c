use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any present env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any present env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("LISTMAP_ENV", "development"));
    let log_level = or_default("LISTMAP_LOG_LEVEL", "info");
    let selectors_path = lookup("LISTMAP_SELECTORS_PATH").ok().map(PathBuf::from);

    let debounce_window_ms = parse_u64("LISTMAP_DEBOUNCE_WINDOW_MS", "300")?;
    let default_center_lat = parse_f64("LISTMAP_DEFAULT_CENTER_LAT", "0")?;
    let default_center_lng = parse_f64("LISTMAP_DEFAULT_CENTER_LNG", "0")?;
    let default_zoom = parse_u8("LISTMAP_DEFAULT_ZOOM", "2")?;
    let watch_interval_ms = parse_u64("LISTMAP_WATCH_INTERVAL_MS", "1000")?;

    Ok(AppConfig {
        env,
        log_level,
        selectors_path,
        debounce_window_ms,
        default_center_lat,
        default_center_lng,
        default_zoom,
        watch_interval_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
