//! Field extraction from a single product listing element.
//!
//! Each field is read from an ordered list of candidate sources and the first
//! non-empty value wins. Extraction never fails; an element that does not
//! yield a valid record is reported as `None`.

use std::sync::LazyLock;

use brickwatch_core::{synthesize_id, ProductRecord};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Selector};

use crate::dom::{
    ancestors, attr_non_empty, collapse_whitespace, first_match, has_match, selector, text_of,
};
use crate::price::{contains_price_token, AMOUNT_RE, PERCENT_OFF_RE};

static NAME_LINK: LazyLock<Selector> = LazyLock::new(|| {
    selector(".product-title a, .product-name a, h2 a, h3 a, h5 a, .item-title a, h5")
});
static NAME_TEXT: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-title, .product-name, h2, h3, h5, .item-title"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| selector(".product_img_link, .product-image a, a.product-thumbnail, a"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| {
    selector(".price, .product-price, .special-price, [class*=\"price\"], .content_price span")
});
static IMAGE: LazyLock<Selector> = LazyLock::new(|| {
    selector(".product-image img, .product_img_link img, .product-thumbnail img, img")
});
static OUT_OF_STOCK: LazyLock<Selector> =
    LazyLock::new(|| selector(".out-of-stock, .unavailable, .sold-out"));

/// Image attributes in preference order: lazy-load and high-resolution
/// variants before the plain `src`.
const IMAGE_ATTRS: [&str; 7] = [
    "data-src-large",
    "data-full-size-image-url",
    "data-high-res-src",
    "data-original",
    "data-lazy-src",
    "data-src",
    "src",
];

const PRODUCT_ID_ATTRS: [&str; 2] = ["data-id-product", "data-product-id"];

static LINK_QUERY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id_product=(\d+)").expect("valid query id regex"));
static LINK_PATH_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)-").expect("valid path id regex"));
static SET_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("valid set number regex"));

/// Extracts a [`ProductRecord`] from one listing element.
///
/// Returns `None` when the extracted fields do not form a valid record.
/// Relative links and image URLs are resolved against `base_url`.
#[must_use]
pub fn extract_product(element: ElementRef<'_>, base_url: &Url) -> Option<ProductRecord> {
    let name_element = first_match(element, &NAME_LINK);
    let name = extract_name(element, name_element);
    let link = extract_link(element, name_element, base_url);
    let price = extract_price(element);
    let image_url = extract_image(element);
    let id = extract_id(element, &link, &name);
    let in_stock = !has_match(element, &OUT_OF_STOCK);

    let mut record = ProductRecord {
        id,
        name,
        price,
        link,
        image_url,
        in_stock,
    };

    if !record.is_valid() {
        tracing::trace!(
            name = %record.name,
            id = %record.id,
            "listing element did not yield a valid product"
        );
        return None;
    }

    record.link = absolutize(&record.link, base_url);
    record.image_url = absolutize(&record.image_url, base_url);
    if record.image_url.is_empty() {
        if let Some(url) = set_image_fallback(&record.name) {
            record.image_url = url;
        }
    }

    tracing::trace!(id = %record.id, name = %record.name, "extracted product");
    Some(record)
}

fn extract_name(element: ElementRef<'_>, name_element: Option<ElementRef<'_>>) -> String {
    let from_link = name_element
        .map(|el| collapse_whitespace(&text_of(el)))
        .filter(|name| !name.is_empty());
    from_link
        .or_else(|| first_match(element, &NAME_TEXT).map(|el| collapse_whitespace(&text_of(el))))
        .unwrap_or_default()
}

fn extract_link(
    element: ElementRef<'_>,
    name_element: Option<ElementRef<'_>>,
    base_url: &Url,
) -> String {
    if let Some(href) = name_element.and_then(|el| attr_non_empty(el, "href")) {
        return href.to_string();
    }
    if let Some(href) = first_match(element, &LINK).and_then(|el| attr_non_empty(el, "href")) {
        return href.to_string();
    }
    own_product_id(element)
        .and_then(|id| {
            base_url
                .join(&format!("product.php?id_product={id}"))
                .ok()
        })
        .map(String::from)
        .unwrap_or_default()
}

/// Concatenates price-bearing text in document order. Nested price elements
/// each contribute their own text, so a wrapper and its child may both
/// appear; the parser only reads the first two amounts.
fn extract_price(element: ElementRef<'_>) -> String {
    let parts: Vec<String> = element
        .select(&PRICE)
        .map(|el| collapse_whitespace(&text_of(el)))
        .filter(|text| contains_price_token(text))
        .collect();
    if !parts.is_empty() {
        return parts.join(" ");
    }

    let text = text_of(element);
    let amounts: Vec<&str> = AMOUNT_RE.find_iter(&text).map(|m| m.as_str()).collect();
    if !amounts.is_empty() {
        return amounts.join(" ");
    }

    PERCENT_OFF_RE
        .find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_image(element: ElementRef<'_>) -> String {
    first_match(element, &IMAGE)
        .and_then(|img| IMAGE_ATTRS.iter().find_map(|attr| attr_non_empty(img, attr)))
        .map(str::to_string)
        .unwrap_or_default()
}

fn extract_id(element: ElementRef<'_>, link: &str, name: &str) -> String {
    if let Some(id) = own_product_id(element) {
        return id.to_string();
    }

    let from_link = LINK_QUERY_ID_RE
        .captures(link)
        .or_else(|| LINK_PATH_ID_RE.captures(link))
        .and_then(|cap| cap.get(1));
    if let Some(m) = from_link {
        return m.as_str().to_string();
    }

    if let Some(id) = ancestors(element).find_map(own_product_id) {
        return id.to_string();
    }

    if name.is_empty() {
        String::new()
    } else {
        synthesize_id(name)
    }
}

fn own_product_id(element: ElementRef<'_>) -> Option<&str> {
    PRODUCT_ID_ATTRS
        .iter()
        .find_map(|attr| attr_non_empty(element, attr))
}

/// Resolves `value` against `base_url` unless it already starts with `http`.
/// Unresolvable values are kept as extracted.
fn absolutize(value: &str, base_url: &Url) -> String {
    if value.is_empty() || value.starts_with("http") {
        return value.to_string();
    }
    base_url
        .join(value)
        .map_or_else(|_| value.to_string(), String::from)
}

/// Manufacturer image for a LEGO set when the listing had none.
fn set_image_fallback(name: &str) -> Option<String> {
    if !name.contains("LEGO") {
        return None;
    }
    SET_NUMBER_RE
        .find(name)
        .map(|set| format!("https://www.lego.com/cdn/cs/set/assets/{}_1.png", set.as_str()))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
