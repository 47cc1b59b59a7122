// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product records, either from a catalogue listing or implied by order carts.

use std::collections::HashMap;

use nexus_core::Product;
use serde_json::Value;

use crate::fields::{self, Extract};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200";

const ID: &[Extract] = &[Extract::At(&["id"]), Extract::At(&["_id"])];
const NAME: &[Extract] = &[Extract::At(&["name"])];
const DESCRIPTION: &[Extract] = &[Extract::At(&["description"])];
const PRICE: &[Extract] = &[Extract::At(&["price"])];
const STOCK: &[Extract] = &[Extract::At(&["stock"]), Extract::At(&["quantity"])];
const RESTOCK: &[Extract] = &[
    Extract::At(&["estimated_restock_date"]),
    Extract::At(&["estimatedRestockDate"]),
];
const IMAGE: &[Extract] = &[
    Extract::At(&["images", "0", "md"]),
    Extract::At(&["image_url"]),
];
/// Key a cart line's product is de-duplicated on.
const CART_PRODUCT_KEY: &[Extract] = &[Extract::At(&["_id"]), Extract::At(&["id"])];

/// Map one raw product record.
pub fn map_product(raw: &Value) -> Product {
    Product {
        id: fields::text(raw, ID).unwrap_or_else(|| format!("prod-{}", uuid::Uuid::new_v4())),
        name: fields::text(raw, NAME).unwrap_or_else(|| "Unnamed Product".to_string()),
        description: fields::text(raw, DESCRIPTION).unwrap_or_default(),
        price: fields::number(raw, PRICE).map_or(0.0, fields::non_negative),
        stock: fields::number(raw, STOCK).map_or(0, |n| fields::non_negative(n).floor() as u64),
        estimated_restock_date: fields::text(raw, RESTOCK),
        image_url: fields::text(raw, IMAGE).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        variations: raw.get("variations").and_then(Value::as_object).cloned(),
    }
}

/// Map a `get_products` result.
///
/// When every record is an order (it carries a `cart` list) the catalogue is
/// the set of products referenced by those carts.
pub fn map_products(records: &[Value]) -> Vec<Product> {
    if looks_like_orders(records) {
        let implied = products_from_carts(records);
        tracing::debug!(
            orders = records.len(),
            products = implied.len(),
            "deriving catalogue from order carts"
        );
        implied.iter().map(map_product).collect()
    } else {
        records.iter().map(map_product).collect()
    }
}

fn looks_like_orders(records: &[Value]) -> bool {
    !records.is_empty()
        && records
            .iter()
            .all(|r| r.get("cart").is_some_and(Value::is_array))
}

/// Unique cart products across `orders`.
///
/// Products keep the position of their first sighting; a later sighting of
/// the same id replaces the stored object. Lines without an id are skipped.
pub fn products_from_carts(orders: &[Value]) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let lines = orders
        .iter()
        .filter_map(|order| order.get("cart").and_then(Value::as_array))
        .flatten();

    for line in lines {
        let Some(product) = line.get("product").filter(|p| p.is_object()) else {
            continue;
        };
        let Some(key) = fields::text(product, CART_PRODUCT_KEY) else {
            continue;
        };
        match index.get(&key) {
            Some(&slot) => unique[slot] = product.clone(),
            None => {
                index.insert(key, unique.len());
                unique.push(product.clone());
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn catalogue_record() {
        let product = map_product(&json!({
            "_id": "PROD-2",
            "name": "Smart Fitness Watch V2",
            "price": "159",
            "stock": 0,
            "estimated_restock_date": "2023-11-15",
            "images": [{"md": "https://cdn.example.com/watch-md.jpg", "lg": "x"}],
            "variations": {"color": ["black", "silver"]}
        }));
        assert_eq!(product.id, "PROD-2");
        assert_eq!(product.price, 159.0);
        assert_eq!(product.stock, 0);
        assert!(product.is_out_of_stock());
        assert_eq!(product.estimated_restock_date.as_deref(), Some("2023-11-15"));
        assert_eq!(product.image_url, "https://cdn.example.com/watch-md.jpg");
        assert_eq!(product.variations.unwrap()["color"][1], "silver");
    }

    #[test]
    fn sparse_record_gets_defaults() {
        let product = map_product(&json!({"price": -5, "stock": "3.9"}));
        assert!(product.id.starts_with("prod-"));
        assert_eq!(product.name, "Unnamed Product");
        assert_eq!(product.description, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock, 3);
        assert_eq!(product.image_url, PLACEHOLDER_IMAGE);
        assert!(product.variations.is_none());
    }

    #[test]
    fn cart_products_are_deduplicated() {
        let orders = [
            json!({"_id": "o1", "cart": [
                {"quantity": 1, "product": {"_id": "p1", "name": "Headphones", "price": 299}},
                {"quantity": 2, "product": {"_id": "p2", "name": "Chair", "price": 450}}
            ]}),
            json!({"_id": "o2", "cart": [
                {"quantity": 1, "product": {"_id": "p1", "name": "Headphones v2", "price": 279}}
            ]}),
        ];
        let products = map_products(&orders);
        assert_eq!(products.len(), 2);
        assert_eq!(products.iter().filter(|p| p.id == "p1").count(), 1);
        assert_eq!(products[0].id, "p1");
        assert_eq!(products[0].name, "Headphones v2");
        assert_eq!(products[1].id, "p2");
    }

    #[test]
    fn cart_lines_without_product_id_are_skipped() {
        let orders = [json!({"cart": [{"product": {"name": "ghost"}}, {"sku": "x"}, "junk"]})];
        assert!(map_products(&orders).is_empty());
    }

    #[test]
    fn mixed_records_are_not_orders() {
        let records = [
            json!({"_id": "o1", "cart": []}),
            json!({"_id": "p9", "name": "Lamp"}),
        ];
        let products = map_products(&records);
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Lamp");
    }
}
