pub mod catalog;
pub mod client;
pub mod demo;
mod dom;
pub mod error;
pub mod extract;
pub mod locator;
pub mod price;
mod rate_limit;

pub use catalog::{CatalogScraper, ScrapeOutcome, ScrapeSource};
pub use client::PageClient;
pub use demo::demo_products;
pub use error::ScraperError;
pub use extract::extract_product;
pub use locator::{extract_page, locate, Located, PageExtraction};
pub use price::{parse_price, PriceInfo};
