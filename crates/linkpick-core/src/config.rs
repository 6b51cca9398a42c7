use crate::app_config::AppConfig;
use crate::ConfigError;

/// Browser-like user agent sent on product-page fetches. Shop frontends
/// serve reduced markup (or none) to obvious bot agents.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let bind_addr = {
        let raw = or_default("LINKPICK_BIND_ADDR", "0.0.0.0:3000");
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "LINKPICK_BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?
    };

    let request_timeout_secs = {
        let raw = or_default("LINKPICK_REQUEST_TIMEOUT_SECS", "30");
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "LINKPICK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: e.to_string(),
        })?
    };

    let log_level = or_default("LINKPICK_LOG_LEVEL", "info");
    let user_agent = or_default("LINKPICK_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}
