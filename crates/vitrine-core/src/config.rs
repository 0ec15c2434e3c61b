use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Reads `.env` (if present) into the process environment, then builds the
/// storefront config from `VITRINE_*` variables.
///
/// # Errors
///
/// Returns [`ConfigError`] when a base URL is missing or not http(s), or a
/// numeric or enum variable does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// Returns [`ConfigError`] when a base URL is missing or not http(s), or a
/// numeric or enum variable does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Config from an arbitrary lookup, so tests can feed a map instead of the
/// real environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

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

    let api_base_url = require("VITRINE_API_BASE_URL")?;
    let media_base_url = require("VITRINE_MEDIA_BASE_URL")?;

    for (var, value) in [
        ("VITRINE_API_BASE_URL", &api_base_url),
        ("VITRINE_MEDIA_BASE_URL", &media_base_url),
    ] {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("\"{value}\" is not an http(s) URL"),
            });
        }
    }

    let env = parse_environment(&or_default("VITRINE_ENV", "development"))?;
    let log_level = or_default("VITRINE_LOG_LEVEL", "info");
    let site_url = optional("VITRINE_SITE_URL");
    let default_fb_pixel_id = optional("VITRINE_FB_PIXEL_ID");
    let request_timeout_secs = parse_u64("VITRINE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VITRINE_USER_AGENT", "vitrine/0.1 (storefront)");

    Ok(AppConfig {
        env,
        api_base_url,
        media_base_url,
        site_url,
        default_fb_pixel_id,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
