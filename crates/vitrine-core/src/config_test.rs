use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("VITRINE_API_BASE_URL", "https://api.example.tn/api");
    m.insert("VITRINE_MEDIA_BASE_URL", "https://api.example.tn");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VITRINE_ENV"));
}

#[test]
fn build_app_config_fails_without_api_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "VITRINE_API_BASE_URL"),
        "expected MissingEnvVar(VITRINE_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_media_base_url() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VITRINE_API_BASE_URL", "https://api.example.tn/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "VITRINE_MEDIA_BASE_URL"),
        "expected MissingEnvVar(VITRINE_MEDIA_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_required_var_as_missing() {
    let mut map = full_env();
    map.insert("VITRINE_MEDIA_BASE_URL", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "VITRINE_MEDIA_BASE_URL"));
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = full_env();
    map.insert("VITRINE_API_BASE_URL", "ftp://api.example.tn");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_API_BASE_URL"),
        "expected InvalidEnvVar(VITRINE_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "https://api.example.tn/api");
    assert_eq!(cfg.media_base_url, "https://api.example.tn");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "vitrine/0.1 (storefront)");
    assert!(cfg.default_fb_pixel_id.is_none());
    assert!(cfg.site_url.is_none());
}

#[test]
fn build_app_config_reads_default_pixel_id() {
    let mut map = full_env();
    map.insert("VITRINE_FB_PIXEL_ID", "123456789012345");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_fb_pixel_id.as_deref(), Some("123456789012345"));
}

#[test]
fn build_app_config_ignores_blank_pixel_id() {
    let mut map = full_env();
    map.insert("VITRINE_FB_PIXEL_ID", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.default_fb_pixel_id.is_none());
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("VITRINE_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("VITRINE_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VITRINE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = full_env();
    map.insert("VITRINE_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
