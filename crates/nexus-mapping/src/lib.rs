// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain mappers for webhook records.
//!
//! Each mapper is a pure function from a raw JSON record to a domain value.
//! Field names differ between upstream platforms, so every field is read
//! through an ordered table of [`fields::Extract`] strategies and missing or
//! malformed values fall back to defaults instead of failing.

pub mod fields;
pub mod kpi;
pub mod message;
pub mod order;
pub mod product;
pub mod status;

pub use kpi::{aggregate_kpi, platform_shares, revenue_chart};
pub use message::{map_conversations, map_message};
pub use order::{map_order, map_orders};
pub use product::{map_product, map_products};
pub use status::{is_pending_like, map_platform, map_status};
