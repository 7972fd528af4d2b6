use crate::app_config::{
    AppConfig, ChannelIds, Environment, DEFAULT_DISCORD_API_BASE, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
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
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset: `init-env` writes blank placeholders.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BRICKWATCH_ENV", "development"))?;
    let log_level = or_default("BRICKWATCH_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "BRICKWATCH_CATALOG_PATH",
        "./config/catalog.yaml",
    ));

    let poll_interval_minutes = parse_u64("BRICKWATCH_POLL_INTERVAL_MINUTES", "60")?;
    if poll_interval_minutes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRICKWATCH_POLL_INTERVAL_MINUTES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let store_name = or_default("BRICKWATCH_STORE_NAME", "BankeeBricks");

    let scraper_request_timeout_secs = parse_u64("BRICKWATCH_SCRAPER_REQUEST_TIMEOUT_SECS", "15")?;
    let scraper_user_agent = or_default("BRICKWATCH_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_retries = parse_u32("BRICKWATCH_SCRAPER_MAX_RETRIES", "0")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("BRICKWATCH_SCRAPER_RETRY_BACKOFF_BASE_SECS", "2")?;

    let discord_token = optional("DISCORD_TOKEN");
    let discord_api_base = or_default("DISCORD_API_BASE", DEFAULT_DISCORD_API_BASE)
        .trim_end_matches('/')
        .to_string();
    let channels = ChannelIds {
        bestsellers: optional("BESTSELLERS_CHANNEL_ID"),
        sale: optional("SALE_CHANNEL_ID"),
        exclusive: optional("EXCLUSIVE_CHANNEL_ID"),
        new_arrivals: optional("NEW_ARRIVALS_CHANNEL_ID"),
    };

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        poll_interval_minutes,
        store_name,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        discord_token,
        discord_api_base,
        channels,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRICKWATCH_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
