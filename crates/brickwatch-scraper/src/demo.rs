//! Fixed fallback listings used when a category page yields nothing.

use brickwatch_core::{Category, ProductRecord};

fn record(id: &str, name: &str, price: &str, link: &str, image_url: &str) -> ProductRecord {
    ProductRecord {
        id: id.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        link: link.to_string(),
        image_url: image_url.to_string(),
        in_stock: true,
    }
}

fn category_item(category: Category) -> ProductRecord {
    match category {
        Category::Bestsellers => record(
            "product-10295",
            "LEGO® D2C 10295 Creator Expert Porsche 911, Age 18+, Building Blocks, 2021 (1458pcs)",
            "PHP 11,499.00",
            "https://www.bankeebricks.ph/lego-d2c-10295-creator-expert-porsche-911-age-18-building-blocks-2021-1458pcs",
            "https://www.bankeebricks.ph/img/p/2/8/5/0/2850-home_default.jpg",
        ),
        Category::Sale => record(
            "product-10280",
            "LEGO® Creator Expert 10280 Flower Bouquet, Age 18+, Building Blocks, 2021 (756pcs)",
            "PHP 3,360.00 PHP 4,199.00",
            "https://www.bankeebricks.ph/lego-creator-expert-10280-flower-bouquet-age-18-building-blocks-2021-756pcs",
            "https://www.bankeebricks.ph/img/p/2/4/9/9/2499-home_default.jpg",
        ),
        Category::Exclusive => record(
            "product-10333",
            "LEGO® D2C Ideas 10333 Viking Village, Age 18+, Building Blocks, 2023 (2103pcs)",
            "PHP 12,799.00",
            "https://www.bankeebricks.ph/lego-d2c-ideas-10333-viking-village-age-18-building-blocks-2023-2103pcs",
            "https://www.bankeebricks.ph/img/p/4/0/6/1/4061-home_default.jpg",
        ),
        Category::NewArrivals => record(
            "product-21345",
            "LEGO® D2C Ideas 21345 Polaroid OneStep SX-70 Camera, Age 18+, Building Blocks, 2023 (516pcs)",
            "PHP 6,499.00",
            "https://www.bankeebricks.ph/lego-d2c-ideas-21345-polaroid-onestep-sx-70-camera-age-18-building-blocks-2023-516pcs",
            "https://www.bankeebricks.ph/img/p/4/0/3/7/4037-home_default.jpg",
        ),
    }
}

fn generic_items() -> [ProductRecord; 3] {
    [
        record(
            "product-10302",
            "LEGO® D2C Icons 10302 Optimus Prime, Age 18+, Building Blocks, 2022 (1508pcs)",
            "PHP 12,799.00",
            "https://www.bankeebricks.ph/lego-d2c-icons-10302-optimus-prime-age-18-building-blocks-2022-1508pcs",
            "https://www.bankeebricks.ph/img/p/3/7/9/8/3798-home_default.jpg",
        ),
        record(
            "product-21339",
            "LEGO® D2C Ideas 21339 BTS Dynamite, Age 18+, Building Blocks, 2023 (749pcs)",
            "PHP 7,299.00",
            "https://www.bankeebricks.ph/lego-d2c-ideas-21339-bts-dynamite-age-18-building-blocks-2023-749pcs",
            "https://www.bankeebricks.ph/img/p/4/0/5/9/4059-home_default.jpg",
        ),
        record(
            "product-10281",
            "LEGO® Creator Expert 10281 Bonsai Tree, Age 18+, Building Blocks, 2021 (878pcs)",
            "PHP 3,799.00",
            "https://www.bankeebricks.ph/lego-creator-expert-10281-bonsai-tree-age-18-building-blocks-2021-878pcs",
            "https://www.bankeebricks.ph/img/p/2/5/0/4/2504-home_default.jpg",
        ),
    ]
}

/// Demo listings for `category`: its own item first, then three items shared
/// by every category.
#[must_use]
pub fn demo_products(category: Category) -> Vec<ProductRecord> {
    let mut products = Vec::with_capacity(4);
    products.push(category_item(category));
    products.extend(generic_items());
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::parse_price;

    #[test]
    fn every_category_gets_four_valid_records() {
        for category in Category::ALL {
            let products = demo_products(category);
            assert_eq!(products.len(), 4, "{category}");
            assert!(products.iter().all(ProductRecord::is_valid), "{category}");
        }
    }

    #[test]
    fn category_item_comes_first() {
        assert_eq!(demo_products(Category::Bestsellers)[0].id, "product-10295");
        assert_eq!(demo_products(Category::Sale)[0].id, "product-10280");
        assert_eq!(demo_products(Category::Exclusive)[0].id, "product-10333");
        assert_eq!(demo_products(Category::NewArrivals)[0].id, "product-21345");
    }

    #[test]
    fn generic_items_follow_in_fixed_order() {
        let ids: Vec<String> = demo_products(Category::Sale)
            .into_iter()
            .skip(1)
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["product-10302", "product-21339", "product-10281"]);
    }

    #[test]
    fn sale_item_parses_as_discounted() {
        let sale = &demo_products(Category::Sale)[0];
        let info = parse_price(&sale.price);
        assert!(info.is_discounted);
        assert_eq!(info.discount_percentage.as_deref(), Some("20"));
    }
}
