// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Nexus integration tests.
//!
//! - [`MockTransport`] - scripted webhook transport that records every call

pub mod mock_transport;

pub use mock_transport::{MockTransport, RecordedCall};
