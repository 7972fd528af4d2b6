use brickwatch_core::{Category, ProductRecord};
use brickwatch_scraper::parse_price;

use crate::{Notifier, NotifyError};

/// Logs each product instead of delivering it anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    /// One-line summary printed for each product.
    #[must_use]
    pub fn summary_line(category: Category, product: &ProductRecord) -> String {
        let price = parse_price(&product.price);
        let stock = if product.in_stock { "" } else { " [out of stock]" };
        format!(
            "[{}] {} | {}{stock} | {}",
            category.display_name(),
            product.name,
            price.formatted_price,
            product.link
        )
    }
}

impl Notifier for LogNotifier {
    async fn notify(&self, category: Category, product: &ProductRecord) -> Result<(), NotifyError> {
        tracing::info!(
            %category,
            id = %product.id,
            name = %product.name,
            price = %product.price,
            "new product (not delivered)"
        );
        println!("{}", Self::summary_line(category, product));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(in_stock: bool) -> ProductRecord {
        ProductRecord {
            id: "10280".to_string(),
            name: "Flower Bouquet".to_string(),
            price: "PHP 3,360.00 PHP 4,199.00".to_string(),
            link: "https://shop.example/10280".to_string(),
            image_url: String::new(),
            in_stock,
        }
    }

    #[test]
    fn summary_line_uses_display_price() {
        assert_eq!(
            LogNotifier::summary_line(Category::Sale, &product(true)),
            "[Sale] Flower Bouquet | PHP 3,360.00 | https://shop.example/10280"
        );
    }

    #[test]
    fn summary_line_marks_out_of_stock() {
        let line = LogNotifier::summary_line(Category::NewArrivals, &product(false));
        assert!(line.starts_with("[New Arrivals] "));
        assert!(line.contains("[out of stock]"));
    }

    #[tokio::test]
    async fn notify_always_succeeds() {
        LogNotifier
            .notify(Category::Sale, &product(true))
            .await
            .unwrap();
    }
}
