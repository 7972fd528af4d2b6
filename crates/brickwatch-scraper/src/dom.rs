//! Thin query helpers over the parsed document.
//!
//! The locator and extractor only need selector search, text and attribute
//! reads, and ancestor traversal; everything parser-specific stays here.

use scraper::{ElementRef, Selector};

/// Compiles a selector that is known at compile time.
///
/// # Panics
///
/// Panics if `css` is not a valid selector. Only called with literals.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Concatenated text of `element` and all of its descendants.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collapses runs of whitespace to single spaces and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed attribute value, or `None` when absent or blank.
pub(crate) fn attr_non_empty<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// First descendant of `element` matching `selector`, in document order.
pub(crate) fn first_match<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Returns `true` if any descendant of `element` matches `selector`.
pub(crate) fn has_match(element: ElementRef<'_>, selector: &Selector) -> bool {
    first_match(element, selector).is_some()
}

/// `element` itself if it matches, else its nearest matching ancestor.
pub(crate) fn closest<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    if selector.matches(&element) {
        return Some(element);
    }
    ancestors(element).find(|el| selector.matches(el))
}

/// Element ancestors of `element`, nearest first.
pub(crate) fn ancestors(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.ancestors().filter_map(ElementRef::wrap)
}
