//! Listing locator.
//!
//! Tries candidate-finding strategies in priority order (product cards, list
//! containers, product blocks, currency scan) and keeps the first one that
//! finds anything. Extraction then runs over those candidates only.

mod strategies;

use brickwatch_core::ProductRecord;
use reqwest::Url;
use scraper::{ElementRef, Html};

use crate::extract::extract_product;

/// A candidate-finding strategy: a name for logs and a pure search function.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub find: for<'a> fn(&'a Html) -> Vec<ElementRef<'a>>,
}

/// Strategies in priority order.
pub const STRATEGIES: [Strategy; 4] = [
    Strategy {
        name: "product-cards",
        find: strategies::product_cards,
    },
    Strategy {
        name: "product-list-container",
        find: strategies::product_list_container,
    },
    Strategy {
        name: "product-blocks",
        find: strategies::product_blocks,
    },
    Strategy {
        name: "currency-scan",
        find: strategies::currency_scan,
    },
];

/// Candidate elements found on a page, and which strategy found them.
#[derive(Debug, Default)]
pub struct Located<'a> {
    /// `None` when every strategy came up empty.
    pub strategy: Option<&'static str>,
    pub elements: Vec<ElementRef<'a>>,
}

/// Returns the candidates of the first strategy that finds any.
#[must_use]
pub fn locate(document: &Html) -> Located<'_> {
    for strategy in &STRATEGIES {
        let elements = (strategy.find)(document);
        if !elements.is_empty() {
            tracing::debug!(
                strategy = strategy.name,
                candidates = elements.len(),
                "listing strategy matched"
            );
            return Located {
                strategy: Some(strategy.name),
                elements,
            };
        }
    }
    tracing::debug!("no listing strategy matched");
    Located::default()
}

/// Outcome of running the locator and extractor over one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub strategy: Option<&'static str>,
    /// Elements the strategy returned.
    pub candidates: usize,
    /// Candidates that did not yield a valid record.
    pub dropped: usize,
    pub records: Vec<ProductRecord>,
}

/// Parses `html` and extracts every valid product listing on it.
///
/// The parsed document is dropped before returning, so callers may hold the
/// result across `.await` points.
#[must_use]
pub fn extract_page(html: &str, base_url: &Url) -> PageExtraction {
    let document = Html::parse_document(html);
    let located = locate(&document);
    let candidates = located.elements.len();
    let records: Vec<ProductRecord> = located
        .elements
        .into_iter()
        .filter_map(|element| extract_product(element, base_url))
        .collect();

    PageExtraction {
        strategy: located.strategy,
        candidates,
        dropped: candidates - records.len(),
        records,
    }
}
