pub mod app_config;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod products;

pub use app_config::{AppConfig, ChannelIds, Environment, DEFAULT_DISCORD_API_BASE, DEFAULT_USER_AGENT};
pub use catalog::{load_catalog, parse_catalog, CatalogConfig};
pub use categories::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{synthesize_id, ProductRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),

    #[error("category '{0}' is not configured in the catalog")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown category '{key}'; expected one of: {valid}")]
    UnknownCategory { key: String, valid: String },
}
