use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER_AGENT: &str = "pharmadb/0.1 (pharmacy-records)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PHARMADB_ENV", "development"))?;

    let api_url = or_default("PHARMADB_API_URL", DEFAULT_API_URL);
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PHARMADB_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_url}\""),
        });
    }

    let log_level = or_default("PHARMADB_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PHARMADB_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PHARMADB_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("PHARMADB_USER_AGENT", DEFAULT_USER_AGENT);
    let kakao_rest_api_key = lookup("KAKAO_REST_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    Ok(AppConfig {
        env,
        api_url,
        log_level,
        request_timeout_secs,
        user_agent,
        kakao_rest_api_key,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PHARMADB_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
