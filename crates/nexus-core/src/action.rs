// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of operation names understood by the webhook endpoint.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// An operation tag carried in the `action` field of every request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GetDashboardData,
    GetOrders,
    GetProducts,
    GetMessages,
    SyncOrders,
    GenerateReport,
    ChatMessage,
    CancelOrder,
    CheckStatus,
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    ExportData,
    UpdateSettings,
    FilterOrders,
    FilterMessages,
    CallCustomer,
    ChatOptions,
}

impl Action {
    /// The wire name sent in the request envelope.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}
