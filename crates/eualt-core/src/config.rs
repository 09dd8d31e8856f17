use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;
use crate::language::Language;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
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
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("EUALT_ENV", "development"))?;

    let bind_addr = or_default("EUALT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("EUALT_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("EUALT_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("EUALT_CATALOG_PATH", "./data/catalog.json"));
    let translations_path = PathBuf::from(or_default(
        "EUALT_TRANSLATIONS_PATH",
        "./config/translations.yaml",
    ));

    let default_language = or_default("EUALT_DEFAULT_LANGUAGE", "fr")
        .parse::<Language>()
        .map_err(|e| invalid("EUALT_DEFAULT_LANGUAGE", e.to_string()))?;

    let filter_cache_capacity = or_default("EUALT_FILTER_CACHE_CAPACITY", "256")
        .parse::<usize>()
        .map_err(|e| invalid("EUALT_FILTER_CACHE_CAPACITY", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        translations_path,
        default_language,
        filter_cache_capacity,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "EUALT_ENV".to_string(),
            reason: format!("unknown environment {other:?}; expected development, test or production"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
