use chrono::TimeZone;

use super::*;

fn product(price: &str, in_stock: bool) -> ProductRecord {
    ProductRecord {
        id: "10280".to_string(),
        name: "LEGO® Creator Expert 10280 Flower Bouquet".to_string(),
        price: price.to_string(),
        link: "https://www.bankeebricks.ph/10280-flower-bouquet".to_string(),
        image_url: "https://www.bankeebricks.ph/img/2499.jpg".to_string(),
        in_stock,
    }
}

// -----------------------------------------------------------------------
// price_description
// -----------------------------------------------------------------------

#[test]
fn full_price_in_stock() {
    assert_eq!(
        price_description(&product("PHP 7,299.00", true)),
        "**Price:** PHP 7,299.00"
    );
}

#[test]
fn full_price_out_of_stock() {
    assert_eq!(
        price_description(&product("PHP 7,299.00", false)),
        "**Price:** PHP 7,299.00\n**Status:** Out of Stock"
    );
}

#[test]
fn discounted_lists_original_and_discount() {
    assert_eq!(
        price_description(&product("PHP 3,360.00 PHP 4,199.00", true)),
        "**Price:** PHP 3,360.00\n**Original:** PHP 4,199.00\n**Discount:** 20% Off"
    );
}

#[test]
fn discounted_out_of_stock_omits_status() {
    let description = price_description(&product("PHP 3,360.00 PHP 4,199.00", false));
    assert!(!description.contains("Status"));
}

#[test]
fn percentage_only_price() {
    assert_eq!(
        price_description(&product("50% Off", true)),
        "**Price:** 50% Off\n**Discount:** 50% Off"
    );
}

#[test]
fn unstructured_discount_reads_percentage_from_raw_text() {
    // "off" without the "N% Off" shape: the raw text still carries "15%".
    assert_eq!(
        price_description(&product("Take 15% today, limited offer", true)),
        "**Price:** Take 15% today, limited offer\n**Discount:** 15% Off"
    );
}

// -----------------------------------------------------------------------
// build_embed
// -----------------------------------------------------------------------

#[test]
fn embed_carries_product_and_category_details() {
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let p = product("PHP 7,299.00", true);
    let embed = build_embed(
        "BankeeBricks",
        Category::NewArrivals,
        &p,
        Some("attachment://10280.png".to_string()),
        timestamp,
    );
    assert_eq!(embed.title, p.name);
    assert_eq!(embed.url, p.link);
    assert_eq!(embed.color, 0x0000FF);
    assert_eq!(embed.footer.text, "BankeeBricks - New Arrivals");
    assert_eq!(embed.timestamp, "2024-05-01T12:00:00+00:00");
    assert_eq!(
        embed.image,
        Some(EmbedImage {
            url: "attachment://10280.png".to_string()
        })
    );
}

#[test]
fn embed_without_image_omits_the_field() {
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let embed = build_embed(
        "BankeeBricks",
        Category::Sale,
        &product("PHP 7,299.00", true),
        None,
        timestamp,
    );
    let json = serde_json::to_value(&embed).unwrap();
    assert!(json.get("image").is_none());
    assert_eq!(json["color"], 0xFF0000);
    assert_eq!(json["footer"]["text"], "BankeeBricks - Sale");
}

#[test]
fn category_colors() {
    assert_eq!(category_color(Category::Bestsellers), 0x00FF00);
    assert_eq!(category_color(Category::Sale), 0xFF0000);
    assert_eq!(category_color(Category::Exclusive), 0xFFFF00);
    assert_eq!(category_color(Category::NewArrivals), 0x0000FF);
}

// -----------------------------------------------------------------------
// fallback_message
// -----------------------------------------------------------------------

#[test]
fn fallback_for_discounted_product() {
    assert_eq!(
        fallback_message(Category::Sale, &product("PHP 3,360.00 PHP 4,199.00", true)),
        "**New Sale Product:**\n\
         **LEGO® Creator Expert 10280 Flower Bouquet**\n\
         Price: PHP 3,360.00\n\
         Original: PHP 4,199.00\n\
         Discount: 20% Off\n\
         Link: https://www.bankeebricks.ph/10280-flower-bouquet"
    );
}

#[test]
fn fallback_for_out_of_stock_product() {
    assert_eq!(
        fallback_message(Category::Bestsellers, &product("PHP 7,299.00", false)),
        "**New Bestsellers Product:**\n\
         **LEGO® Creator Expert 10280 Flower Bouquet**\n\
         Price: PHP 7,299.00\n\
         Status: Out of Stock\n\
         Link: https://www.bankeebricks.ph/10280-flower-bouquet"
    );
}

// -----------------------------------------------------------------------
// ensure_valid_image_url
// -----------------------------------------------------------------------

#[test]
fn image_url_kept_when_already_valid() {
    assert_eq!(
        ensure_valid_image_url("https://cdn.example/set.JPG"),
        "https://cdn.example/set.JPG"
    );
}

#[test]
fn image_url_gains_scheme() {
    assert_eq!(
        ensure_valid_image_url("//cdn.example/set.jpg"),
        "https://cdn.example/set.jpg"
    );
    assert_eq!(
        ensure_valid_image_url("cdn.example/set.webp"),
        "https://cdn.example/set.webp"
    );
}

#[test]
fn image_url_gains_png_extension() {
    assert_eq!(
        ensure_valid_image_url("https://cdn.example/img/2499"),
        "https://cdn.example/img/2499.png"
    );
}

#[test]
fn image_url_with_query_is_left_alone() {
    assert_eq!(
        ensure_valid_image_url("https://cdn.example/img?id=2499"),
        "https://cdn.example/img?id=2499"
    );
}

#[test]
fn empty_image_url_stays_empty() {
    assert_eq!(ensure_valid_image_url(""), "");
}

// -----------------------------------------------------------------------
// image_format / attachment_name
// -----------------------------------------------------------------------

#[test]
fn content_type_decides_image_format() {
    assert_eq!(
        image_format(Some("image/jpeg; charset=binary"), "https://cdn.example/img/2499"),
        JPEG
    );
    assert_eq!(image_format(Some("IMAGE/WEBP"), "https://cdn.example/a.png"), WEBP);
}

#[test]
fn url_extension_used_when_content_type_is_unhelpful() {
    assert_eq!(
        image_format(Some("application/octet-stream"), "https://cdn.example/a.JPEG?v=2"),
        JPEG
    );
    assert_eq!(image_format(None, "https://cdn.example/a.gif"), GIF);
}

#[test]
fn unknown_image_type_defaults_to_png() {
    assert_eq!(image_format(None, "https://cdn.example/img?id=2499"), PNG);
    assert_eq!(image_format(Some("text/html"), "https://cdn.example/img/2499"), PNG);
}

#[test]
fn attachment_name_uses_format_extension() {
    let p = product("PHP 7,299.00", true);
    assert_eq!(attachment_name(&p, JPEG), "10280.jpg");
    assert_eq!(attachment_name(&p, PNG), "10280.png");
}
