use std::path::PathBuf;

use crate::Category;

/// Desktop Chrome UA; the storefront rejects requests without a
/// browser-looking `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Discord channel ids, one per category. Unset channels skip delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelIds {
    pub bestsellers: Option<String>,
    pub sale: Option<String>,
    pub exclusive: Option<String>,
    pub new_arrivals: Option<String>,
}

impl ChannelIds {
    #[must_use]
    pub fn for_category(&self, category: Category) -> Option<&str> {
        match category {
            Category::Bestsellers => self.bestsellers.as_deref(),
            Category::Sale => self.sale.as_deref(),
            Category::Exclusive => self.exclusive.as_deref(),
            Category::NewArrivals => self.new_arrivals.as_deref(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub poll_interval_minutes: u64,
    pub store_name: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub discord_token: Option<String>,
    pub discord_api_base: String,
    pub channels: ChannelIds,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("poll_interval_minutes", &self.poll_interval_minutes)
            .field("store_name", &self.store_name)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .field(
                "discord_token",
                &self.discord_token.as_ref().map(|_| "[redacted]"),
            )
            .field("discord_api_base", &self.discord_api_base)
            .field("channels", &self.channels)
            .finish()
    }
}
