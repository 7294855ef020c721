//! Integration tests for the Boutique storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_pipeline` - Filtering, search, sorting and paging over a product document
//! - `cart_store` - Cart merging, pricing and persistence across store instances
//! - `form_validation` - Contact and review forms end to end
//!
//! This crate holds the fixtures the scenario tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use boutique_core::{Price, Product, ProductId, Size};

/// Build a product with the attributes the catalog filters on.
#[must_use]
pub fn product(id: &str, name: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_units(price),
        image_url: format!("/assets/product{id}.png"),
        category: "dresses".to_string(),
        color: "black".to_string(),
        size: Size::parse("M"),
        sales_status: false,
        rating: 0.0,
        popularity: 0.0,
    }
}

/// `count` products named `Item 1..=count`, priced 10 apart.
#[must_use]
pub fn numbered_products(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|i| {
            let price = i64::try_from(i).unwrap_or(i64::MAX).saturating_mul(10);
            product(&i.to_string(), &format!("Item {i}"), price)
        })
        .collect()
}

/// A small, varied product document in the wire format.
pub const SAMPLE_DOCUMENT: &str = r#"{
    "products": [
        { "id": "1", "name": "Linen Dress", "price": 120, "imageUrl": "/assets/product1.png",
          "category": "dresses", "color": "white", "size": "S-L", "salesStatus": true,
          "rating": 4.5, "popularity": 80 },
        { "id": "2", "name": "Denim Jacket", "price": 340, "imageUrl": "/assets/product2.png",
          "category": "jackets", "color": "blue", "size": "XL", "salesStatus": false,
          "rating": 4.1, "popularity": 95 },
        { "id": "3", "name": "Silk Blouse", "price": 210, "imageUrl": "/assets/product3.png",
          "category": "tops", "color": "white", "size": "S, M, XL", "salesStatus": false,
          "rating": 4.9, "popularity": 60 },
        { "id": "4", "name": "Wrap Dress", "price": 180, "imageUrl": "/assets/product4.png",
          "category": "dresses", "color": "red", "size": "M", "salesStatus": true,
          "rating": 3.8, "popularity": 70 },
        { "id": "5", "name": "Wool Coat", "price": 990, "imageUrl": "/assets/product5.png",
          "category": "coats", "color": "grey", "size": "L", "salesStatus": false,
          "rating": 4.7, "popularity": 40 }
    ],
    "topBestSets": [
        { "id": "1", "name": "Linen Dress", "price": 120 }
    ]
}"#;
