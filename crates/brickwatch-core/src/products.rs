use serde::{Deserialize, Serialize};

/// One catalog item as scraped from one page view.
///
/// Absent text fields are empty strings rather than `Option`s so that the
/// extraction fallbacks can be expressed as "first non-empty wins".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Stable identifier used for deduplication across polls.
    pub id: String,
    /// Trimmed, whitespace-collapsed display title.
    pub name: String,
    /// Raw price text, e.g. `"PHP 3,360.00 PHP 4,199.00"`. Canonicalized
    /// lazily at notification time.
    pub price: String,
    /// Absolute product page URL. May be empty when `image_url` is set.
    pub link: String,
    /// Absolute image URL. May be empty when `link` is set.
    pub image_url: String,
    pub in_stock: bool,
}

/// Minimum name length (exclusive) for a record to be kept.
const MIN_NAME_CHARS: usize = 3;

impl ProductRecord {
    /// Returns `true` when the record carries enough data to be published:
    /// an id, a name longer than three characters, a price, and at least one
    /// of link or image.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && self.name.chars().count() > MIN_NAME_CHARS
            && !self.price.is_empty()
            && (!self.link.is_empty() || !self.image_url.is_empty())
    }
}

/// Builds a deterministic id from a product name: `"product-"` followed by
/// the lowercased name with every non-alphanumeric character replaced by `-`.
///
/// Distinct names that map to the same slug share an id; the dedup store
/// then treats them as one product.
#[must_use]
pub fn synthesize_id(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("product-{slug}")
}
