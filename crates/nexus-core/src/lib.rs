// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Nexus operator console.
//!
//! Holds the domain view models, the closed webhook action set, the shared
//! error type and the [`WebhookTransport`] trait that view controllers talk
//! through.

pub mod action;
pub mod error;
pub mod traits;
pub mod types;

pub use action::Action;
pub use error::NexusError;
pub use traits::WebhookTransport;
pub use types::{
    AgentSettings, ChartPoint, Conversation, Customer, DataSource, Kpi, Message, Order,
    OrderStatus, Platform, PlatformShare, Product, Tone,
};
