// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in sample data shown when the webhook has nothing to offer.

use chrono::{Duration, Utc};
use nexus_core::{
    ChartPoint, Conversation, Customer, Kpi, Message, Order, OrderStatus, Platform, PlatformShare,
    Product,
};

pub fn kpi() -> Kpi {
    Kpi {
        revenue: 528_976.82,
        revenue_growth: Some(7.9),
        orders: 1243,
        orders_growth: Some(12.5),
        ai_handled_rate: Some(89.0),
        pending_shipments: 45,
    }
}

pub fn revenue_chart() -> Vec<ChartPoint> {
    [
        ("Mon", 4000.0, 240),
        ("Tue", 3000.0, 139),
        ("Wed", 2000.0, 980),
        ("Thu", 2780.0, 390),
        ("Fri", 1890.0, 480),
        ("Sat", 2390.0, 380),
        ("Sun", 3490.0, 430),
    ]
    .into_iter()
    .map(|(label, revenue, orders)| ChartPoint {
        label: label.to_string(),
        revenue,
        orders,
    })
    .collect()
}

/// Placeholder channel mix. The figures are indicative and need not sum to 100.
pub fn platform_shares() -> Vec<PlatformShare> {
    [
        (Platform::Facebook, 65.0),
        (Platform::Instagram, 35.0),
        (Platform::Converty, 80.0),
    ]
    .into_iter()
    .map(|(platform, percent)| PlatformShare { platform, percent })
    .collect()
}

fn customer(id: &str, name: &str, phone: &str, platform_id: &str, platform: Platform) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        platform_id: platform_id.to_string(),
        platform_type: platform,
        avatar_url: None,
    }
}

/// Recent orders, newest first.
pub fn orders() -> Vec<Order> {
    let now = Utc::now();
    let order = |id: &str,
                 store: &str,
                 customer: Customer,
                 reference: &str,
                 status: OrderStatus,
                 total_amount: f64,
                 items_count: u32,
                 age: Duration| Order {
        id: id.to_string(),
        store_id: store.to_string(),
        customer,
        external_ref: reference.to_string(),
        delivery_order_id: None,
        status,
        total_amount,
        items_count,
        created_at: now - age,
    };

    vec![
        order(
            "ORD-001",
            "STR-1",
            customer("CUST-1", "Armin A.", "+216 20 123 456", "fb-1", Platform::Facebook),
            "#9921",
            OrderStatus::Pending,
            120.50,
            2,
            Duration::minutes(30),
        ),
        order(
            "ORD-002",
            "STR-1",
            customer("CUST-2", "Mikasa A.", "+216 98 765 432", "ig-1", Platform::Instagram),
            "#9920",
            OrderStatus::Delivered,
            85.00,
            1,
            Duration::hours(2),
        ),
        order(
            "ORD-003",
            "STR-2",
            customer("CUST-3", "Eren Y.", "+216 50 555 111", "fb-2", Platform::Facebook),
            "#9919",
            OrderStatus::Attempt,
            210.00,
            3,
            Duration::hours(5),
        ),
        order(
            "ORD-004",
            "STR-1",
            customer("CUST-4", "Jean K.", "+216 21 000 999", "ig-2", Platform::Instagram),
            "#9918",
            OrderStatus::Cancelled,
            45.00,
            1,
            Duration::hours(24),
        ),
    ]
}

pub fn products() -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price: f64, stock: u64, image: &str| {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            stock,
            estimated_restock_date: None,
            image_url: image.to_string(),
            variations: None,
        }
    };

    let mut watch = product(
        "PROD-2",
        "Smart Fitness Watch V2",
        "Track your health and workouts.",
        159.00,
        0,
        "https://picsum.photos/201/201",
    );
    watch.estimated_restock_date = Some("2023-11-15".to_string());

    vec![
        product(
            "PROD-1",
            "Wireless Noise Cancelling Headphones",
            "Premium sound quality with 20h battery life.",
            299.00,
            12,
            "https://picsum.photos/200/200",
        ),
        watch,
        product(
            "PROD-3",
            "Ergonomic Office Chair",
            "Lumbar support for long working hours.",
            450.00,
            5,
            "https://picsum.photos/202/202",
        ),
    ]
}

pub fn conversations() -> Vec<Conversation> {
    let now = Utc::now();
    let message = |id: &str,
                   platform: Platform,
                   customer_id: &str,
                   author: &str,
                   content: &str,
                   is_ai_reply: bool,
                   is_comment: bool,
                   age: Duration| Message {
        id: id.to_string(),
        platform,
        customer_id: customer_id.to_string(),
        customer_name: author.to_string(),
        content: content.to_string(),
        is_ai_reply,
        is_comment,
        created_at: now - age,
    };

    let armin = vec![
        message(
            "m1",
            Platform::Facebook,
            "CUST-1",
            "Armin A.",
            "Hi, I saw your ad for the headphones.",
            false,
            false,
            Duration::minutes(15),
        ),
        message(
            "m2",
            Platform::Facebook,
            "CUST-1",
            "AI Agent",
            "Hello! Yes, the Wireless Noise Cancelling Headphones are currently in stock. \
             They cost 299 TND. Would you like to know about the warranty?",
            true,
            false,
            Duration::minutes(14),
        ),
        message(
            "m3",
            Platform::Facebook,
            "CUST-1",
            "Armin A.",
            "Is the black color available?",
            false,
            false,
            Duration::minutes(10),
        ),
    ];
    let mikasa = vec![
        message(
            "m4",
            Platform::Instagram,
            "CUST-2",
            "Mikasa A.",
            "Where is my order?",
            false,
            true,
            Duration::minutes(121),
        ),
        message(
            "m5",
            Platform::Instagram,
            "CUST-2",
            "AI Agent",
            "Checking... Your order #9920 was delivered today at 9:00 AM. We hope you enjoy it!",
            true,
            false,
            Duration::minutes(120),
        ),
    ];

    vec![
        Conversation {
            customer_id: "CUST-1".to_string(),
            customer_name: "Armin A.".to_string(),
            platform: Platform::Facebook,
            last_message: "Is the black color available?".to_string(),
            last_message_time: now - Duration::minutes(10),
            unread_count: 1,
            messages: armin,
        },
        Conversation {
            customer_id: "CUST-2".to_string(),
            customer_name: "Mikasa A.".to_string(),
            platform: Platform::Instagram,
            last_message: "Order confirmed: #9920".to_string(),
            last_message_time: now - Duration::minutes(120),
            unread_count: 0,
            messages: mikasa,
        },
    ]
}
