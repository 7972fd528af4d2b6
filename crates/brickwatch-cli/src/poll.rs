//! One poll cycle: scrape each category, keep the unseen products, announce
//! them.
//!
//! Per-category failures are logged and recorded in the summary rather than
//! propagated, so one bad category does not abort the cycle.

use std::fmt;

use brickwatch_core::{CatalogConfig, Category};
use brickwatch_notify::Notifier;
use brickwatch_scraper::{CatalogScraper, ScrapeSource};
use brickwatch_store::CategoryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CategoryStatus {
    Polled { source: ScrapeSource },
    /// The category could not be polled at all.
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategorySummary {
    pub category: Category,
    pub status: CategoryStatus,
    /// Records the scrape produced.
    pub found: usize,
    /// Records not seen before in this category.
    pub new: usize,
    pub notified: usize,
    pub notify_failures: usize,
}

impl CategorySummary {
    fn skipped(category: Category, reason: String) -> Self {
        Self {
            category,
            status: CategoryStatus::Skipped { reason },
            found: 0,
            new: 0,
            notified: 0,
            notify_failures: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PollSummary {
    pub categories: Vec<CategorySummary>,
}

impl PollSummary {
    pub(crate) fn total_new(&self) -> usize {
        self.categories.iter().map(|c| c.new).sum()
    }

    pub(crate) fn total_notified(&self) -> usize {
        self.categories.iter().map(|c| c.notified).sum()
    }
}

impl fmt::Display for PollSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.categories {
            match &summary.status {
                CategoryStatus::Polled { source } => writeln!(
                    f,
                    "{:<13} {:>3} found {:>3} new {:>3} notified  [{source}]",
                    summary.category.display_name(),
                    summary.found,
                    summary.new,
                    summary.notified,
                )?,
                CategoryStatus::Skipped { reason } => writeln!(
                    f,
                    "{:<13} skipped: {reason}",
                    summary.category.display_name()
                )?,
            }
        }
        write!(
            f,
            "total: {} new, {} notified",
            self.total_new(),
            self.total_notified()
        )
    }
}

/// Polls every configured category in poll order.
pub(crate) async fn poll_all<N: Notifier + Sync>(
    scraper: &CatalogScraper,
    catalog: &CatalogConfig,
    store: &mut CategoryStore,
    notifier: &N,
) -> PollSummary {
    let categories: Vec<Category> = catalog.configured_categories().collect();
    poll_categories(scraper, catalog, store, notifier, &categories).await
}

/// Polls `categories` sequentially.
pub(crate) async fn poll_categories<N: Notifier + Sync>(
    scraper: &CatalogScraper,
    catalog: &CatalogConfig,
    store: &mut CategoryStore,
    notifier: &N,
    categories: &[Category],
) -> PollSummary {
    let mut summary = PollSummary::default();
    for &category in categories {
        summary
            .categories
            .push(poll_category(scraper, catalog, store, notifier, category).await);
    }
    tracing::info!(
        categories = summary.categories.len(),
        new = summary.total_new(),
        notified = summary.total_notified(),
        "poll cycle complete"
    );
    summary
}

async fn poll_category<N: Notifier + Sync>(
    scraper: &CatalogScraper,
    catalog: &CatalogConfig,
    store: &mut CategoryStore,
    notifier: &N,
    category: Category,
) -> CategorySummary {
    let url = match catalog.category_url(category) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(%category, error = %e, "cannot build category URL");
            return CategorySummary::skipped(category, e.to_string());
        }
    };

    let site_url = match catalog.site_url() {
        Ok(site_url) => site_url,
        Err(e) => {
            tracing::error!(%category, error = %e, "invalid catalog base URL");
            return CategorySummary::skipped(category, e.to_string());
        }
    };

    let outcome = scraper.scrape_category(category, &url, &site_url).await;
    let found = outcome.records.len();

    let fresh = match store.admit_new(category, &outcome.records) {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::error!(%category, error = %e, "dedup store rejected category");
            return CategorySummary::skipped(category, e.to_string());
        }
    };
    tracing::info!(%category, found, new = fresh.len(), source = %outcome.source, "category polled");

    let mut notified = 0;
    let mut notify_failures = 0;
    for product in &fresh {
        match notifier.notify(category, product).await {
            Ok(()) => notified += 1,
            Err(e) => {
                notify_failures += 1;
                tracing::error!(%category, id = %product.id, error = %e, "notification failed");
            }
        }
    }

    CategorySummary {
        category,
        status: CategoryStatus::Polled {
            source: outcome.source,
        },
        found,
        new: fresh.len(),
        notified,
        notify_failures,
    }
}

#[cfg(test)]
#[path = "poll_test.rs"]
mod tests;
