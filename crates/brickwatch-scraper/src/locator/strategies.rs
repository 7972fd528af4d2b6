use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::dom::{closest, has_match, selector, text_of};
use crate::price::AMOUNT_RE;

static PRODUCT_CARDS: LazyLock<Selector> =
    LazyLock::new(|| selector(".ajax_block_product, .product-miniature, .product-item, article"));
static LIST_CONTAINERS: LazyLock<Selector> =
    LazyLock::new(|| selector("#js-product-list, .products-grid, .product_list, .products"));
static CONTAINER_ITEMS: LazyLock<Selector> = LazyLock::new(|| {
    selector(".product-miniature, .product-item, .item, article, .product-container")
});
static CONTAINER_LIST_ITEMS: LazyLock<Selector> =
    LazyLock::new(|| selector("li, .ajax_block_product"));
static PRODUCT_SHAPE: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-title, h5, .price, img"));
static PRODUCT_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| selector(".ajax_block_product, .product-container, .product-miniature"));
static LISTING_ANCESTOR: LazyLock<Selector> = LazyLock::new(|| {
    selector("article, .product, .item, div[class*=\"product\"], li.ajax_block_product")
});

/// Collects elements in discovery order, dropping repeats of the same node.
/// Candidate lists stay small, so a linear membership check is enough.
#[derive(Default)]
struct UniqueElements<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> UniqueElements<'a> {
    fn push(&mut self, element: ElementRef<'a>) {
        if !self.elements.contains(&element) {
            self.elements.push(element);
        }
    }
}

pub(super) fn product_cards(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&PRODUCT_CARDS).collect()
}

/// Items inside known listing containers. Falls back to list items that look
/// like products when the containers hold no recognised item markup.
pub(super) fn product_list_container(document: &Html) -> Vec<ElementRef<'_>> {
    let containers: Vec<ElementRef<'_>> = document.select(&LIST_CONTAINERS).collect();
    if containers.is_empty() {
        return Vec::new();
    }

    let mut items = UniqueElements::default();
    for container in &containers {
        container.select(&CONTAINER_ITEMS).for_each(|el| items.push(el));
    }
    if !items.elements.is_empty() {
        return items.elements;
    }

    for container in &containers {
        container
            .select(&CONTAINER_LIST_ITEMS)
            .filter(|el| has_match(*el, &PRODUCT_SHAPE))
            .for_each(|el| items.push(el));
    }
    items.elements
}

pub(super) fn product_blocks(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&PRODUCT_BLOCKS).collect()
}

/// Every element whose text carries an amount, mapped to its enclosing
/// listing-shaped element.
pub(super) fn currency_scan(document: &Html) -> Vec<ElementRef<'_>> {
    let mut items = UniqueElements::default();
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| AMOUNT_RE.is_match(&text_of(*el)))
        .filter_map(|el| closest(el, &LISTING_ANCESTOR))
        .for_each(|el| items.push(el));
    items.elements
}
