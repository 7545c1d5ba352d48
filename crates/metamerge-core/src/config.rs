use crate::app_config::{AppConfig, Environment};
use crate::platform::UnknownPlatformPolicy;
use crate::ConfigError;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("METAMERGE_ENV", "development"))?;
    let log_level = or_default("METAMERGE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("METAMERGE_DATA_DIR", "./data"));
    let mappings_path = PathBuf::from(or_default(
        "METAMERGE_MAPPINGS_PATH",
        "./config/mappings.yaml",
    ));

    let unknown_raw = or_default("METAMERGE_UNKNOWN_PLATFORM", "facebook");
    let unknown_platform = unknown_raw
        .parse::<UnknownPlatformPolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "METAMERGE_UNKNOWN_PLATFORM".to_string(),
            reason,
        })?;

    let preview_rows = parse_usize("METAMERGE_PREVIEW_ROWS", "5")?;
    if preview_rows == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "METAMERGE_PREVIEW_ROWS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        mappings_path,
        unknown_platform,
        preview_rows,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "METAMERGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
