// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order records from the store and delivery workflows.

use chrono::Utc;
use nexus_core::{Customer, Order};
use serde_json::Value;

use crate::fields::{self, Extract};
use crate::status::{map_platform, map_status};

const ID: &[Extract] = &[Extract::At(&["_id"]), Extract::At(&["id"])];
const STORE: &[Extract] = &[Extract::At(&["store"]), Extract::At(&["store_id"])];
const CUSTOMER_ID: &[Extract] = &[
    Extract::At(&["customer", "_id"]),
    Extract::At(&["customer", "id"]),
    Extract::At(&["_id"]),
];
const CUSTOMER_NAME: &[Extract] = &[
    Extract::At(&["customer", "name"]),
    Extract::Joined(&[&["firstname"], &["lastname"]]),
];
const PHONE: &[Extract] = &[Extract::At(&["customer", "phone"]), Extract::At(&["phone"])];
const PLATFORM_ID: &[Extract] = &[Extract::At(&["customer", "platform_id"])];
const AVATAR: &[Extract] = &[
    Extract::At(&["customer", "avatar_url"]),
    Extract::At(&["customer", "avatar"]),
];
const SOURCE: &[Extract] = &[Extract::At(&["source"]), Extract::At(&["platform"])];
const REFERENCE: &[Extract] = &[Extract::At(&["reference"])];
const DELIVERY_ID: &[Extract] = &[
    Extract::At(&["deliveryId"]),
    Extract::At(&["delivery_order_id"]),
    Extract::At(&["barcode"]),
];
const STATUS: &[Extract] = &[Extract::At(&["status"])];
pub(crate) const TOTAL: &[Extract] = &[
    Extract::At(&["total", "totalPrice"]),
    Extract::At(&["total"]),
    Extract::At(&["total_amount"]),
];
const ITEMS: &[Extract] = &[
    Extract::Len(&["products"]),
    Extract::Len(&["cart"]),
    Extract::At(&["items_count"]),
];
pub(crate) const CREATED_AT: &[Extract] = &[Extract::At(&["createdAt"]), Extract::At(&["created_at"])];

/// Map one raw order record.
pub fn map_order(raw: &Value) -> Order {
    let status = fields::text(raw, STATUS).unwrap_or_default();
    let source = fields::text(raw, SOURCE).unwrap_or_default();

    Order {
        id: fields::text(raw, ID).unwrap_or_else(|| format!("temp-{}", uuid::Uuid::new_v4())),
        store_id: fields::text(raw, STORE).unwrap_or_else(|| "unknown".to_string()),
        customer: Customer {
            id: fields::text(raw, CUSTOMER_ID)
                .unwrap_or_else(|| format!("cust-{}", uuid::Uuid::new_v4())),
            name: fields::text(raw, CUSTOMER_NAME)
                .unwrap_or_else(|| "Unknown Customer".to_string()),
            phone: fields::text(raw, PHONE).unwrap_or_else(|| "N/A".to_string()),
            platform_id: fields::text(raw, PLATFORM_ID).unwrap_or_else(|| "unknown".to_string()),
            platform_type: map_platform(&source),
            avatar_url: fields::text(raw, AVATAR),
        },
        external_ref: fields::text(raw, REFERENCE)
            .map_or_else(|| "N/A".to_string(), |r| format!("#{r}")),
        delivery_order_id: fields::text(raw, DELIVERY_ID),
        status: map_status(&status),
        total_amount: order_total(raw),
        items_count: fields::count(raw, ITEMS)
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX)),
        created_at: fields::timestamp(raw, CREATED_AT).unwrap_or_else(Utc::now),
    }
}

/// Map every record, newest first.
pub fn map_orders(records: &[Value]) -> Vec<Order> {
    let mut orders: Vec<Order> = records.iter().map(map_order).collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

/// Order total as a non-negative amount.
pub fn order_total(raw: &Value) -> f64 {
    fields::number(raw, TOTAL).map_or(0.0, fields::non_negative)
}
