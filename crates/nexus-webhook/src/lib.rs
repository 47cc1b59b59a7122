// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook plumbing for the Nexus operator console.
//!
//! [`WebhookClient`] posts action-tagged requests to the automation endpoint;
//! [`normalize::extract`] flattens whatever comes back into a list of records.

pub mod client;
pub mod normalize;
pub mod response;

pub use client::WebhookClient;
pub use normalize::{Record, WireShape, extract};
pub use response::WebhookResponse;
