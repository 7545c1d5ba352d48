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

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "METAMERGE_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir.to_str(), Some("./data"));
    assert_eq!(cfg.mappings_path.to_str(), Some("./config/mappings.yaml"));
    assert_eq!(cfg.unknown_platform, UnknownPlatformPolicy::AssumeFacebook);
    assert_eq!(cfg.preview_rows, 5);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("METAMERGE_ENV", "production");
    map.insert("METAMERGE_LOG_LEVEL", "debug");
    map.insert("METAMERGE_DATA_DIR", "/var/lib/metamerge");
    map.insert("METAMERGE_MAPPINGS_PATH", "/etc/metamerge/mappings.yaml");
    map.insert("METAMERGE_UNKNOWN_PLATFORM", "reject");
    map.insert("METAMERGE_PREVIEW_ROWS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.data_dir.to_str(), Some("/var/lib/metamerge"));
    assert_eq!(
        cfg.mappings_path.to_str(),
        Some("/etc/metamerge/mappings.yaml")
    );
    assert_eq!(cfg.unknown_platform, UnknownPlatformPolicy::Reject);
    assert_eq!(cfg.preview_rows, 10);
}

#[test]
fn build_app_config_accepts_instagram_fallback() {
    let mut map = HashMap::new();
    map.insert("METAMERGE_UNKNOWN_PLATFORM", "Instagram");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.unknown_platform, UnknownPlatformPolicy::AssumeInstagram);
}

#[test]
fn build_app_config_fails_with_invalid_environment() {
    let mut map = HashMap::new();
    map.insert("METAMERGE_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "METAMERGE_ENV"),
        "expected InvalidEnvVar(METAMERGE_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_unknown_platform() {
    let mut map = HashMap::new();
    map.insert("METAMERGE_UNKNOWN_PLATFORM", "tiktok");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "METAMERGE_UNKNOWN_PLATFORM"),
        "expected InvalidEnvVar(METAMERGE_UNKNOWN_PLATFORM), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_preview_rows() {
    let mut map = HashMap::new();
    map.insert("METAMERGE_PREVIEW_ROWS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "METAMERGE_PREVIEW_ROWS"),
        "expected InvalidEnvVar(METAMERGE_PREVIEW_ROWS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_preview_rows() {
    let mut map = HashMap::new();
    map.insert("METAMERGE_PREVIEW_ROWS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "METAMERGE_PREVIEW_ROWS"),
        "expected InvalidEnvVar(METAMERGE_PREVIEW_ROWS), got: {result:?}"
    );
}

#[test]
fn load_app_config_reads_process_environment() {
    std::env::set_var("METAMERGE_PREVIEW_ROWS", "9");
    let result = load_app_config();
    std::env::remove_var("METAMERGE_PREVIEW_ROWS");
    assert_eq!(result.unwrap().preview_rows, 9);
}
