//! Per-category scrape: fetch, locate, extract, and demo fallback.

use std::fmt;

use brickwatch_core::{AppConfig, Category, ProductRecord};
use reqwest::Url;

use crate::client::PageClient;
use crate::demo::demo_products;
use crate::error::ScraperError;
use crate::locator::extract_page;

/// Where a category's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeSource {
    /// Extracted from the live page by the named listing strategy.
    Live { strategy: &'static str },
    /// The page loaded but yielded no valid listings.
    DemoNoProducts,
    /// The page could not be fetched.
    DemoFetchFailed,
}

impl fmt::Display for ScrapeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live { strategy } => write!(f, "live ({strategy})"),
            Self::DemoNoProducts => f.write_str("demo (no products)"),
            Self::DemoFetchFailed => f.write_str("demo (fetch failed)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub category: Category,
    pub source: ScrapeSource,
    pub records: Vec<ProductRecord>,
}

impl ScrapeOutcome {
    fn demo(category: Category, source: ScrapeSource) -> Self {
        Self {
            category,
            source,
            records: demo_products(category),
        }
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        !matches!(self.source, ScrapeSource::Live { .. })
    }
}

/// Scrapes category pages into product records.
///
/// Never fails: fetch errors and pages without listings degrade to the demo
/// dataset for that category, and the reason is recorded in the outcome.
pub struct CatalogScraper {
    client: PageClient,
}

impl CatalogScraper {
    #[must_use]
    pub fn new(client: PageClient) -> Self {
        Self { client }
    }

    /// Builds a scraper whose page client follows the scraper settings in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = PageClient::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
        )?;
        Ok(Self::new(client))
    }

    /// Fetches the category page at `url` and extracts its listings.
    ///
    /// Relative links and images resolve against `site_url`, the storefront
    /// root, not the category page.
    pub async fn scrape_category(
        &self,
        category: Category,
        url: &str,
        site_url: &Url,
    ) -> ScrapeOutcome {
        tracing::info!(%category, url, "scraping category");

        let body = match self.client.fetch_page(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%category, url, error = %e, "fetch failed, using demo products");
                return ScrapeOutcome::demo(category, ScrapeSource::DemoFetchFailed);
            }
        };

        let extraction = extract_page(&body, site_url);
        match extraction.strategy {
            Some(strategy) if !extraction.records.is_empty() => {
                tracing::info!(
                    %category,
                    strategy,
                    candidates = extraction.candidates,
                    dropped = extraction.dropped,
                    products = extraction.records.len(),
                    "extracted products"
                );
                ScrapeOutcome {
                    category,
                    source: ScrapeSource::Live { strategy },
                    records: extraction.records,
                }
            }
            _ => {
                tracing::warn!(
                    %category,
                    url,
                    strategy = extraction.strategy.unwrap_or("none"),
                    candidates = extraction.candidates,
                    "no valid products on page, using demo products"
                );
                ScrapeOutcome::demo(category, ScrapeSource::DemoNoProducts)
            }
        }
    }
}
