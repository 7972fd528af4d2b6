//! Pure message rendering: embed payloads and the plain-text fallback.

use std::fmt::Write as _;
use std::sync::LazyLock;

use brickwatch_core::{Category, ProductRecord};
use brickwatch_scraper::parse_price;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("valid percent regex"));

const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// A Discord embed, serialized as the REST API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    pub color: u32,
    pub description: String,
    pub timestamp: String,
    pub footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// Embed accent color per category.
#[must_use]
pub fn category_color(category: Category) -> u32 {
    match category {
        Category::Bestsellers => 0x00FF00,
        Category::Sale => 0xFF0000,
        Category::Exclusive => 0xFFFF00,
        Category::NewArrivals => 0x0000FF,
    }
}

/// Markdown price block for the embed description.
///
/// Discounted products list the price, the original price and the discount
/// when known. Full-price products that are out of stock say so.
#[must_use]
pub fn price_description(product: &ProductRecord) -> String {
    let price = parse_price(&product.price);
    let mut description = format!("**Price:** {}", price.formatted_price);

    if price.is_discounted {
        if let Some(original) = &price.original_price {
            let _ = write!(description, "\n**Original:** {original}");
        }
        let percentage = price.discount_percentage.clone().or_else(|| {
            PERCENT_RE
                .captures(&product.price)
                .and_then(|cap| cap.get(1))
                .map(|m| m.as_str().to_string())
        });
        if let Some(pct) = percentage {
            let _ = write!(description, "\n**Discount:** {pct}% Off");
        }
    } else if !product.in_stock {
        description.push_str("\n**Status:** Out of Stock");
    }

    description
}

/// Footer text, e.g. `"BankeeBricks - New Arrivals"`.
#[must_use]
pub fn footer_text(store_name: &str, category: Category) -> String {
    format!("{store_name} - {}", category.display_name())
}

/// Builds the product embed. `image_url` is either an `attachment://` name
/// or a remote URL already passed through [`ensure_valid_image_url`].
#[must_use]
pub fn build_embed(
    store_name: &str,
    category: Category,
    product: &ProductRecord,
    image_url: Option<String>,
    timestamp: DateTime<Utc>,
) -> Embed {
    Embed {
        title: product.name.clone(),
        url: product.link.clone(),
        color: category_color(category),
        description: price_description(product),
        timestamp: timestamp.to_rfc3339(),
        footer: EmbedFooter {
            text: footer_text(store_name, category),
        },
        image: image_url
            .filter(|url| !url.is_empty())
            .map(|url| EmbedImage { url }),
    }
}

/// Plain-text message sent when the embed cannot be delivered.
#[must_use]
pub fn fallback_message(category: Category, product: &ProductRecord) -> String {
    let price = parse_price(&product.price);
    let mut message = format!(
        "**New {} Product:**\n**{}**\nPrice: {}",
        category.display_name(),
        product.name,
        price.formatted_price
    );

    if price.is_discounted {
        if let Some(original) = &price.original_price {
            let _ = write!(message, "\nOriginal: {original}");
        }
        if let Some(pct) = &price.discount_percentage {
            let _ = write!(message, "\nDiscount: {pct}% Off");
        }
    }
    if !product.in_stock {
        message.push_str("\nStatus: Out of Stock");
    }
    let _ = write!(message, "\nLink: {}", product.link);

    message
}

/// Normalizes an image URL for embedding.
///
/// Adds `https://` when the scheme is missing (dropping a leading `//`), and
/// appends `.png` when the URL has no known image extension and no query or
/// fragment. Empty input stays empty.
#[must_use]
pub fn ensure_valid_image_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let mut url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url.strip_prefix("//").unwrap_or(url))
    };

    let lower = url.to_lowercase();
    let has_extension = IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));
    if !has_extension && !url.contains('?') && !url.contains('#') {
        url.push_str(".png");
    }

    url
}

/// An image type Discord renders inline in an embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFormat {
    pub mime: &'static str,
    pub extension: &'static str,
}

pub const PNG: ImageFormat = ImageFormat {
    mime: "image/png",
    extension: "png",
};
pub const JPEG: ImageFormat = ImageFormat {
    mime: "image/jpeg",
    extension: "jpg",
};
pub const GIF: ImageFormat = ImageFormat {
    mime: "image/gif",
    extension: "gif",
};
pub const WEBP: ImageFormat = ImageFormat {
    mime: "image/webp",
    extension: "webp",
};

/// Picks the upload format for a downloaded image.
///
/// The response `Content-Type` wins when it names a known image type, then
/// the extension of the URL path. Anything else is uploaded as PNG.
#[must_use]
pub fn image_format(content_type: Option<&str>, url: &str) -> ImageFormat {
    let from_header = content_type.and_then(|value| {
        let mime = value.split(';').next().unwrap_or_default().trim();
        match mime.to_ascii_lowercase().as_str() {
            "image/png" => Some(PNG),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(JPEG),
            "image/gif" => Some(GIF),
            "image/webp" => Some(WEBP),
            _ => None,
        }
    });
    from_header
        .or_else(|| {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
            match extension.as_str() {
                "png" => Some(PNG),
                "jpg" | "jpeg" => Some(JPEG),
                "gif" => Some(GIF),
                "webp" => Some(WEBP),
                _ => None,
            }
        })
        .unwrap_or(PNG)
}

/// File name used when the product image is uploaded as an attachment.
#[must_use]
pub fn attachment_name(product: &ProductRecord, format: ImageFormat) -> String {
    format!("{}.{}", product.id, format.extension)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
