// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits between the view controllers and the outside world.

pub mod transport;

pub use transport::WebhookTransport;
