//! Canonicalization of raw price text into [`PriceInfo`].
//!
//! Storefront price blocks mix up to four notations: a single amount, a
//! sale amount followed by the original amount, an amount with a
//! `"N% Off"` badge, or the badge alone. [`parse_price`] reconciles them
//! into one shape. It is total: every input yields a `PriceInfo`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Currency code prefixing every amount on the storefront.
pub const CURRENCY_CODE: &str = "PHP";

/// `PHP 1,234.56`: code, optional space, digits with optional thousands
/// separators, optional two-digit decimals.
pub(crate) static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PHP\s*\d[\d,]*(?:\.\d{2})?").expect("valid amount regex"));

/// `20% Off`, case-insensitive.
pub(crate) static PERCENT_OFF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)%\s*off").expect("valid percent regex"));

/// `12 In Stock` annotations some themes render inside the price block.
/// Anchored on whitespace so the trailing digits of an amount never match.
static STOCK_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)\d+\s*in\s*stock").expect("valid stock count regex")
});

const NOT_AVAILABLE: &str = "N/A";

/// Canonical price derived from a raw price string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    /// Price to display: the discounted price when there is one.
    pub formatted_price: String,
    pub is_discounted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    /// Whole-number percentage, e.g. `"20"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<String>,
}

impl PriceInfo {
    fn plain(formatted_price: impl Into<String>, is_discounted: bool) -> Self {
        Self {
            formatted_price: formatted_price.into(),
            is_discounted,
            original_price: None,
            discount_percentage: None,
        }
    }
}

/// Parses raw price text into a [`PriceInfo`].
///
/// Rules, first match wins:
/// 1. Empty input → `"N/A"`, not discounted.
/// 2. Two amounts and a percentage → sale, original, and percentage as given.
/// 3. One amount and a percentage → original derived as
///    `current / (1 - pct/100)`; omitted when that is undefined.
/// 4. Percentage only → `"N% Off"`.
/// 5. Two amounts → sale and original; percentage derived when the original
///    is higher.
/// 6. One amount → not discounted.
/// 7. Anything else → the cleaned text, discounted iff it mentions "off".
#[must_use]
pub fn parse_price(raw: &str) -> PriceInfo {
    if raw.trim().is_empty() {
        return PriceInfo::plain(NOT_AVAILABLE, false);
    }

    let cleaned = STOCK_COUNT_RE.replace(raw.trim(), "").trim().to_string();

    let percentage = PERCENT_OFF_RE
        .captures(&cleaned)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string());
    let amounts: Vec<&str> = AMOUNT_RE.find_iter(&cleaned).map(|m| m.as_str()).collect();

    match (amounts.as_slice(), percentage) {
        ([current, original, ..], Some(pct)) => PriceInfo {
            formatted_price: (*current).to_string(),
            is_discounted: true,
            original_price: Some((*original).to_string()),
            discount_percentage: Some(pct),
        },
        ([current], Some(pct)) => PriceInfo {
            formatted_price: (*current).to_string(),
            is_discounted: true,
            original_price: derive_original_price(current, &pct),
            discount_percentage: Some(pct),
        },
        ([], Some(pct)) => PriceInfo {
            formatted_price: format!("{pct}% Off"),
            is_discounted: true,
            original_price: None,
            discount_percentage: Some(pct),
        },
        ([current, original, ..], None) => PriceInfo {
            formatted_price: (*current).to_string(),
            is_discounted: true,
            original_price: Some((*original).to_string()),
            discount_percentage: derive_discount_percentage(current, original),
        },
        ([current], None) => PriceInfo::plain(*current, false),
        ([], None) => {
            let is_discounted = cleaned.to_lowercase().contains("off");
            PriceInfo::plain(cleaned, is_discounted)
        }
    }
}

/// Returns `true` if `text` contains an amount token or an `N% Off` token.
#[must_use]
pub fn contains_price_token(text: &str) -> bool {
    AMOUNT_RE.is_match(text) || PERCENT_OFF_RE.is_match(text)
}

/// Numeric value of an amount token such as `"PHP 4,199.00"`.
///
/// Returns `None` when the digits do not form a finite number.
#[must_use]
pub fn amount_value(token: &str) -> Option<f64> {
    let digits: String = token
        .trim_start_matches(CURRENCY_CODE)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a value as `1,234.56`: thousands separators, two decimals.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Solves `original = current / (1 - pct/100)`.
///
/// Returns `None` for a zero percentage or when the result is not a finite
/// positive amount (e.g. `100% Off`).
fn derive_original_price(current: &str, pct: &str) -> Option<String> {
    let current = amount_value(current)?;
    let pct = pct.parse::<u32>().ok().filter(|p| *p > 0)?;
    let original = current / (1.0 - f64::from(pct) / 100.0);
    if !original.is_finite() || original <= 0.0 {
        return None;
    }
    Some(format!("{CURRENCY_CODE} {}", format_amount(original)))
}

/// `round((original - current) / original * 100)` with half-up rounding, or
/// `None` unless `original > current`.
fn derive_discount_percentage(current: &str, original: &str) -> Option<String> {
    let current = amount_value(current)?;
    let original = amount_value(original)?;
    if original <= current {
        return None;
    }
    let pct = ((original - current) / original * 100.0 + 0.5).floor();
    #[allow(clippy::cast_possible_truncation)]
    Some((pct as i64).to_string())
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
