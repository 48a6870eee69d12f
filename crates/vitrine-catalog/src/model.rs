//! Catalog entities served to clients.
//!
//! Field names on the wire follow the established client contract
//! (`category_id`, `qty`, `discount`, `discount_price`, `product_images`).

use serde::{Deserialize, Serialize};

use vitrine_core::{CategoryId, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Position of the category in the categories manifest.
    pub id: CategoryId,
    /// Display name, also the category's directory name.
    pub name: String,
}

/// A product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Servable URL path of the image file.
    #[serde(rename = "image_name")]
    pub path: String,
}

/// A product as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Globally unique id within one snapshot.
    pub id: ProductId,
    /// Id of the category the product was listed under.
    pub category_id: CategoryId,
    /// Display name from the detail record.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Merchant product code.
    pub code: i64,
    /// Units in stock.
    #[serde(rename = "qty")]
    pub quantity: i64,
    /// Regular price.
    pub price: f64,
    /// Whether the discount price applies.
    #[serde(rename = "discount")]
    pub has_discount: bool,
    /// Discounted price.
    pub discount_price: f64,
    /// Images in the order listed in the detail record.
    #[serde(rename = "product_images")]
    pub images: Vec<Image>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_wire_format() {
        let product = Product {
            id: ProductId::new(4),
            category_id: CategoryId::new(1),
            name: "Apple".to_string(),
            description: "Crisp".to_string(),
            code: 1001,
            quantity: 12,
            price: 2.5,
            has_discount: true,
            discount_price: 1.99,
            images: vec![Image {
                path: "/resources/categories/fruits/products/apple/images/a.jpg".to_string(),
            }],
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["category_id"], 1);
        assert_eq!(value["qty"], 12);
        assert_eq!(value["discount"], true);
        assert_eq!(value["discount_price"], 1.99);
        assert_eq!(
            value["product_images"][0]["image_name"],
            "/resources/categories/fruits/products/apple/images/a.jpg"
        );
    }

    #[test]
    fn empty_image_list_is_an_array() {
        let product = Product {
            id: ProductId::new(0),
            category_id: CategoryId::new(0),
            name: String::new(),
            description: String::new(),
            code: 0,
            quantity: 0,
            price: 0.0,
            has_discount: false,
            discount_price: 0.0,
            images: Vec::new(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["product_images"], serde_json::json!([]));
    }
}
