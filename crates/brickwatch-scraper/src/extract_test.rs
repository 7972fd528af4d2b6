use scraper::Html;

use super::*;

const BASE: &str = "https://www.bankeebricks.ph/";

fn extract_first(markup: &str, css: &str) -> Option<ProductRecord> {
    let html = Html::parse_fragment(markup);
    let base = Url::parse(BASE).unwrap();
    let element = html
        .select(&selector(css))
        .next()
        .unwrap_or_else(|| panic!("no element matches {css}"));
    extract_product(element, &base)
}

#[test]
fn extracts_full_product_miniature() {
    let markup = r#"
        <article class="product-miniature" data-id-product="2850">
          <a href="/lego-porsche" class="product-thumbnail">
            <img data-src="/img/p/2850-home_default.jpg" src="/img/placeholder.png">
          </a>
          <h3 class="product-title">
            <a href="https://www.bankeebricks.ph/2850-lego-porsche.html">  LEGO® Porsche
               911 10295 </a>
          </h3>
          <div class="product-meta"><span class="price">PHP 11,499.00</span></div>
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(record.id, "2850");
    assert_eq!(record.name, "LEGO® Porsche 911 10295");
    assert_eq!(record.link, "https://www.bankeebricks.ph/2850-lego-porsche.html");
    assert_eq!(record.price, "PHP 11,499.00");
    assert_eq!(
        record.image_url,
        "https://www.bankeebricks.ph/img/p/2850-home_default.jpg"
    );
    assert!(record.in_stock);
}

#[test]
fn sale_listing_joins_price_parts_in_document_order() {
    let markup = r#"
        <div class="ajax_block_product">
          <h5><a href="/1234-flower-bouquet.html">LEGO Flower Bouquet</a></h5>
          <span class="price">PHP 3,360.00</span>
          <span class="regular-price">PHP 4,199.00</span>
          <span class="price-discount">-20% Off</span>
          <span class="price-note">Free shipping</span>
        </div>"#;
    let record = extract_first(markup, ".ajax_block_product").unwrap();
    assert_eq!(record.price, "PHP 3,360.00 PHP 4,199.00 -20% Off");
    assert_eq!(record.id, "1234");
    assert_eq!(
        record.link,
        "https://www.bankeebricks.ph/1234-flower-bouquet.html"
    );
    assert_eq!(record.image_url, "", "no five-digit set number to fall back on");
}

#[test]
fn nested_price_elements_each_contribute() {
    let markup = r#"
        <article>
          <h2><a href="/bonsai">Bonsai Tree</a></h2>
          <div class="product-price-and-shipping"><span class="price">PHP 500.00</span></div>
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(record.price, "PHP 500.00 PHP 500.00");
}

#[test]
fn id_from_query_string_link() {
    let markup = r#"
        <article>
          <h2><a href="index.php?id_product=77&amp;controller=product">Creator Lighthouse</a></h2>
          <span class="price">PHP 2,100.00</span>
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(record.id, "77");
    assert_eq!(
        record.link,
        "https://www.bankeebricks.ph/index.php?id_product=77&controller=product"
    );
}

#[test]
fn id_from_ancestor_attribute() {
    let markup = r#"
        <ul>
          <li data-id-product="555">
            <div class="item">
              <h3>Technic Crane</h3>
              <a href="/technic-crane">view</a>
              <span class="price">PHP 1,000.00</span>
            </div>
          </li>
        </ul>"#;
    let record = extract_first(markup, ".item").unwrap();
    assert_eq!(record.id, "555");
    assert_eq!(record.name, "Technic Crane");
    assert_eq!(record.link, "https://www.bankeebricks.ph/technic-crane");
}

#[test]
fn id_synthesized_from_name_as_last_resort() {
    let markup = r#"
        <div class="item">
          <h3>Technic Crane</h3>
          <a href="/technic-crane">view</a>
          <span class="price">PHP 1,000.00</span>
        </div>"#;
    let record = extract_first(markup, ".item").unwrap();
    assert_eq!(record.id, "product-technic-crane");
}

#[test]
fn link_synthesized_from_product_id_attribute() {
    let markup = r#"
        <div class="product" data-product-id="42">
          <h2>City Fire Station</h2>
          <span class="price">PHP 2,000.00</span>
        </div>"#;
    let record = extract_first(markup, ".product").unwrap();
    assert_eq!(record.id, "42");
    assert_eq!(
        record.link,
        "https://www.bankeebricks.ph/product.php?id_product=42"
    );
}

#[test]
fn price_falls_back_to_amounts_in_text() {
    let markup = r#"
        <article>
          <h2>Star Wars X-Wing</h2>
          <p>Now PHP 999.00, was PHP 1,299.00</p>
          <img src="//cdn.example/xwing.jpg">
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(record.price, "PHP 999.00 PHP 1,299.00");
    assert_eq!(record.link, "");
    assert_eq!(record.image_url, "https://cdn.example/xwing.jpg");
    assert_eq!(record.id, "product-star-wars-x-wing");
}

#[test]
fn price_falls_back_to_percentage_in_text() {
    let markup = r#"
        <article>
          <h2><a href="/mystery">Mystery Minifigure</a></h2>
          <p>Save 30% off today</p>
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(record.price, "30% off");
}

#[test]
fn image_attribute_preference() {
    let markup = r#"
        <article>
          <h2><a href="/castle">Medieval Castle</a></h2>
          <span class="price">PHP 5,000.00</span>
          <img src="/small.jpg" data-src="/lazy.jpg" data-full-size-image-url="https://img.example/full.jpg">
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(record.image_url, "https://img.example/full.jpg");
}

#[test]
fn out_of_stock_marker() {
    let markup = r#"
        <article>
          <h2><a href="/castle">Medieval Castle</a></h2>
          <span class="price">PHP 5,000.00</span>
          <span class="sold-out">Sold out</span>
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert!(!record.in_stock);
}

#[test]
fn lego_set_image_fallback() {
    let markup = r#"
        <article>
          <h2><a href="/optimus">LEGO Icons 10302 Optimus Prime</a></h2>
          <span class="price">PHP 12,799.00</span>
        </article>"#;
    let record = extract_first(markup, "article").unwrap();
    assert_eq!(
        record.image_url,
        "https://www.lego.com/cdn/cs/set/assets/10302_1.png"
    );
}

#[test]
fn short_name_is_rejected() {
    let markup = r#"
        <article>
          <h2><a href="/box">Box</a></h2>
          <span class="price">PHP 100.00</span>
        </article>"#;
    assert!(extract_first(markup, "article").is_none());
}

#[test]
fn missing_price_is_rejected() {
    let markup = r#"
        <article>
          <h2><a href="/castle">Medieval Castle</a></h2>
          <p>Coming soon</p>
        </article>"#;
    assert!(extract_first(markup, "article").is_none());
}

#[test]
fn missing_link_and_image_is_rejected() {
    let markup = r#"
        <article>
          <h2>Medieval Castle</h2>
          <span class="price">PHP 5,000.00</span>
        </article>"#;
    assert!(extract_first(markup, "article").is_none());
}
