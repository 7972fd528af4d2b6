//! Integration tests for `CatalogScraper::scrape_category`: live extraction
//! and both demo fallbacks.

use reqwest::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brickwatch_core::Category;
use brickwatch_scraper::{demo_products, CatalogScraper, PageClient, ScrapeSource};

fn test_scraper() -> CatalogScraper {
    let client = PageClient::new(5, "brickwatch-test/0.1", 0, 0).expect("client");
    CatalogScraper::new(client)
}

fn site_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("mock server uri")
}

const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Offers</title></head><body>
  <div id="js-product-list">
    <article class="product-miniature" data-id-product="2499">
      <a class="product-thumbnail" href="/2499-flower-bouquet.html">
        <img data-src="/img/p/2499-home_default.jpg" src="/img/blank.gif">
      </a>
      <h3 class="product-title"><a href="/2499-flower-bouquet.html">LEGO® Creator Expert 10280 Flower Bouquet</a></h3>
      <span class="price">PHP 3,360.00</span>
      <span class="regular-price">PHP 4,199.00</span>
    </article>
    <article class="product-miniature" data-id-product="2504">
      <h3 class="product-title"><a href="/2504-bonsai-tree.html">LEGO® Creator Expert 10281 Bonsai Tree</a></h3>
      <span class="price">PHP 3,799.00</span>
      <span class="out-of-stock">Out of stock</span>
    </article>
  </div>
</body></html>"#;

#[tokio::test]
async fn live_page_yields_extracted_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers-sale"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&server)
        .await;

    let outcome = test_scraper()
        .scrape_category(
            Category::Sale,
            &format!("{}/offers-sale", server.uri()),
            &site_url(&server),
        )
        .await;

    assert_eq!(
        outcome.source,
        ScrapeSource::Live {
            strategy: "product-cards"
        }
    );
    assert!(!outcome.is_demo());
    assert_eq!(outcome.records.len(), 2);

    let bouquet = &outcome.records[0];
    assert_eq!(bouquet.id, "2499");
    assert_eq!(bouquet.price, "PHP 3,360.00 PHP 4,199.00");
    assert_eq!(
        bouquet.link,
        format!("{}/2499-flower-bouquet.html", server.uri())
    );
    assert_eq!(
        bouquet.image_url,
        format!("{}/img/p/2499-home_default.jpg", server.uri())
    );
    assert!(bouquet.in_stock);

    let bonsai = &outcome.records[1];
    assert!(!bonsai.in_stock);
    assert_eq!(
        bonsai.image_url,
        "https://www.lego.com/cdn/cs/set/assets/10281_1.png"
    );
}

#[tokio::test]
async fn nested_category_path_resolves_against_site_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/category/lego"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
              <article class="product-miniature" data-id-product="77">
                <h3 class="product-title">Creator Lighthouse</h3>
                <img src="img/p/77.jpg">
                <span class="price">PHP 2,100.00</span>
              </article>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    let outcome = test_scraper()
        .scrape_category(
            Category::Sale,
            &format!("{}/category/lego", server.uri()),
            &site_url(&server),
        )
        .await;

    assert!(!outcome.is_demo());
    let record = &outcome.records[0];
    assert_eq!(record.id, "77");
    assert_eq!(
        record.link,
        format!("{}/product.php?id_product=77", server.uri())
    );
    assert_eq!(record.image_url, format!("{}/img/p/77.jpg", server.uri()));
}

#[tokio::test]
async fn page_without_listings_falls_back_to_demo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Under maintenance</p></body></html>"),
        )
        .mount(&server)
        .await;

    let outcome = test_scraper()
        .scrape_category(
            Category::Exclusive,
            &format!("{}/16-exclusives", server.uri()),
            &site_url(&server),
        )
        .await;

    assert_eq!(outcome.source, ScrapeSource::DemoNoProducts);
    assert_eq!(outcome.records, demo_products(Category::Exclusive));
}

#[tokio::test]
async fn fetch_failure_falls_back_to_demo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = test_scraper()
        .scrape_category(
            Category::Bestsellers,
            &format!("{}/best-sales", server.uri()),
            &site_url(&server),
        )
        .await;

    assert_eq!(outcome.source, ScrapeSource::DemoFetchFailed);
    assert!(outcome.is_demo());
    assert_eq!(outcome.records[0].id, "product-10295");
}

#[tokio::test]
async fn invalid_url_falls_back_to_demo() {
    let site = Url::parse("https://www.bankeebricks.ph/").expect("site url");
    let outcome = test_scraper()
        .scrape_category(Category::NewArrivals, "::not-a-url::", &site)
        .await;
    assert_eq!(outcome.source, ScrapeSource::DemoFetchFailed);
    assert_eq!(outcome.records.len(), 4);
}
