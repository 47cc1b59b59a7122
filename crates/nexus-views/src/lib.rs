// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless view controllers for the Nexus operator console.
//!
//! Each controller owns the state of one console screen and talks to the
//! automation endpoint through a shared [`WebhookTransport`]. Fetches pipe
//! the reply through the normalizer and a domain mapper; when that yields
//! nothing the controller shows the built-in [`sample`] data instead.

pub mod dashboard;
pub mod messages;
pub mod orders;
pub mod products;
pub mod sample;
pub mod settings;

pub use dashboard::{DashboardSnapshot, DashboardView};
pub use messages::{MessageFilter, MessagesView, SendOutcome};
pub use orders::OrdersView;
pub use products::{NewProduct, ProductsView};
pub use settings::SettingsView;

use std::sync::atomic::{AtomicUsize, Ordering};

use nexus_config::model::ConsoleConfig;
use nexus_core::{Action, WebhookTransport};
use nexus_webhook::{Record, WebhookResponse, extract};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Behaviour shared by every view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Replace empty or failed fetches with sample data.
    pub fallback_to_samples: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            fallback_to_samples: true,
        }
    }
}

impl From<&ConsoleConfig> for ViewOptions {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            fallback_to_samples: config.fallback_to_samples,
        }
    }
}

/// Call `action` with no extra fields and flatten the reply into records.
pub(crate) async fn fetch_records(transport: &dyn WebhookTransport, action: Action) -> Vec<Record> {
    let raw = transport.trigger(action, Map::new()).await;
    let records = extract(&raw);
    if records.is_empty() {
        let reply = WebhookResponse::from_value(&raw);
        warn!(
            action = %action,
            success = reply.success,
            message = reply.message.as_deref().unwrap_or(""),
            "webhook returned no records"
        );
    } else {
        debug!(action = %action, count = records.len(), "fetched records");
    }
    records
}

/// Fire `action` with `fields` and read the reply envelope.
pub(crate) async fn command(
    transport: &dyn WebhookTransport,
    action: Action,
    fields: Map<String, Value>,
) -> WebhookResponse {
    let reply = WebhookResponse::from_value(&transport.trigger(action, fields).await);
    if !reply.success {
        warn!(
            action = %action,
            message = reply.message.as_deref().unwrap_or(""),
            "webhook action did not succeed"
        );
    }
    reply
}

/// Build a request field map from `(name, value)` pairs.
pub(crate) fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Counts one in-flight operation for as long as it lives.
///
/// Dropping the guard, including when the owning future is cancelled,
/// releases the count, so overlapping operations keep the indicator raised
/// until the last one finishes.
pub(crate) struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    pub(crate) fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_counts_overlapping_guards() {
        let counter = AtomicUsize::new(0);
        let first = InFlight::enter(&counter);
        let second = InFlight::enter(&counter);
        drop(first);
        assert_eq!(counter.load(Ordering::Acquire), 1);
        drop(second);
        assert_eq!(counter.load(Ordering::Acquire), 0);
    }
}
