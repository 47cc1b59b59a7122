// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain view models shared by the mappers and view controllers.
//!
//! Every value here is transient: built from a webhook response or a sample
//! set, replaced wholesale on the next refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle state of an order as shown to the operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Attempt,
    Rejected,
    Delivered,
    Cancelled,
    Confirmed,
    Uploaded,
}

/// Channel a customer reached the store through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Converty,
}

/// Where a view's current data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Mapped from a webhook response.
    Live,
    /// Built-in sample set used when the webhook had nothing to offer.
    Sample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub platform_id: String,
    pub platform_type: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub store_id: String,
    pub customer: Customer,
    /// Store-side order reference, rendered as `#<reference>`.
    pub external_ref: String,
    /// Delivery provider tracking reference, when the order was shipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_order_id: Option<String>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub items_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_restock_date: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Map<String, Value>>,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Under ten units left but not sold out.
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock < 10
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub platform: Platform,
    pub customer_id: String,
    pub customer_name: String,
    pub content: String,
    pub is_ai_reply: bool,
    /// Posted as a public comment rather than a direct message.
    pub is_comment: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub customer_id: String,
    pub customer_name: String,
    pub platform: Platform,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: u32,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Appends `message` and moves the conversation preview to it.
    pub fn push(&mut self, message: Message) {
        self.last_message = message.content.clone();
        self.last_message_time = message.created_at;
        self.messages.push(message);
    }
}

/// Headline business indicators.
///
/// Growth figures and the AI-handled rate need a historical baseline the
/// webhook does not provide; they are `None` when computed from live orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub revenue: f64,
    pub revenue_growth: Option<f64>,
    pub orders: u64,
    pub orders_growth: Option<f64>,
    pub ai_handled_rate: Option<f64>,
    pub pending_shipments: u64,
}

/// One day of the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Short weekday name (`Mon`, `Tue`, ...).
    pub label: String,
    pub revenue: f64,
    pub orders: u64,
}

/// Share of orders that came through one platform, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub platform: Platform,
    pub percent: f64,
}

/// Reply tone used by the AI agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[strum(serialize = "formal")]
    #[serde(rename = "formal")]
    Formal,
    #[default]
    #[strum(serialize = "friendly")]
    #[serde(rename = "friendly")]
    Friendly,
    #[strum(to_string = "tunisian dialect", serialize = "tunisian")]
    #[serde(rename = "tunisian dialect")]
    TunisianDialect,
}

impl Tone {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Formal => "Professional and concise responses.",
            Self::Friendly => "Warm, engaging, and enthusiastic.",
            Self::TunisianDialect => "Natural Tunisian Derja for local authenticity.",
        }
    }
}

/// Operator-tunable behaviour of the AI agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    pub tone: Tone,
    /// Standard delivery delay quoted to customers, 1 to 7 days.
    pub delivery_delay_days: u8,
    /// Send "Order Confirmed" automatically once details are received.
    pub auto_confirm: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            tone: Tone::Friendly,
            delivery_delay_days: 2,
            auto_confirm: true,
        }
    }
}
