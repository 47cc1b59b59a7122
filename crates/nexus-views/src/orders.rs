// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orders screen: the order list, delivery sync and per-order actions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nexus_core::{Action, DataSource, Order, OrderStatus, WebhookTransport};
use nexus_mapping::map_orders;
use nexus_webhook::WebhookResponse;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::{InFlight, ViewOptions, command, fetch_records, fields, sample};

#[derive(Debug)]
struct OrdersState {
    orders: Vec<Order>,
    source: DataSource,
    /// `None` shows every status.
    status_filter: Option<OrderStatus>,
    search: String,
}

impl OrdersState {
    fn matches(&self, order: &Order) -> bool {
        if self.status_filter.is_some_and(|status| status != order.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            order.external_ref.as_str(),
            order.id.as_str(),
            order.customer.phone.as_str(),
            order.customer.name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Controller for the orders screen.
pub struct OrdersView {
    transport: Arc<dyn WebhookTransport>,
    options: ViewOptions,
    state: Mutex<OrdersState>,
    syncing: AtomicUsize,
}

impl OrdersView {
    pub fn new(transport: Arc<dyn WebhookTransport>, options: ViewOptions) -> Self {
        Self {
            transport,
            options,
            state: Mutex::new(OrdersState {
                orders: Vec::new(),
                source: DataSource::Sample,
                status_filter: None,
                search: String::new(),
            }),
            syncing: AtomicUsize::new(0),
        }
    }

    /// Reload the order list, newest first.
    pub async fn refresh(&self) -> Vec<Order> {
        let records = fetch_records(self.transport.as_ref(), Action::GetOrders).await;
        let (orders, source) = if records.is_empty() && self.options.fallback_to_samples {
            (sample::orders(), DataSource::Sample)
        } else {
            (map_orders(&records), DataSource::Live)
        };
        info!(count = orders.len(), source = %source, "orders refreshed");

        let mut state = self.state.lock().await;
        state.orders = orders.clone();
        state.source = source;
        orders
    }

    /// Ask the endpoint to pull fresh delivery statuses, then reload.
    pub async fn sync(&self) -> Vec<Order> {
        let _syncing = InFlight::enter(&self.syncing);
        let reply = command(self.transport.as_ref(), Action::SyncOrders, Map::new()).await;
        info!(success = reply.success, "delivery sync requested");
        self.refresh().await
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire) > 0
    }

    /// Show only `status` (or everything for `None`) and tell the endpoint.
    pub async fn filter(&self, status: Option<OrderStatus>) -> Vec<Order> {
        self.state.lock().await.status_filter = status;
        let wire = status.map_or_else(|| "all".to_string(), |s| s.to_string());
        command(
            self.transport.as_ref(),
            Action::FilterOrders,
            fields([("status", Value::String(wire))]),
        )
        .await;
        self.visible().await
    }

    /// Local search over reference, id, phone and customer name.
    pub async fn search(&self, query: &str) -> Vec<Order> {
        self.state.lock().await.search = query.to_string();
        self.visible().await
    }

    /// Orders passing the current status filter and search.
    pub async fn visible(&self) -> Vec<Order> {
        let state = self.state.lock().await;
        state
            .orders
            .iter()
            .filter(|order| state.matches(order))
            .cloned()
            .collect()
    }

    pub async fn source(&self) -> DataSource {
        self.state.lock().await.source
    }

    pub async fn export(&self) -> WebhookResponse {
        command(self.transport.as_ref(), Action::ExportData, Map::new()).await
    }

    /// Cancel one order; on success the local copy is marked cancelled.
    pub async fn cancel(&self, order_id: &str) -> WebhookResponse {
        let reply = command(
            self.transport.as_ref(),
            Action::CancelOrder,
            fields([("orderId", Value::from(order_id))]),
        )
        .await;
        if reply.success {
            let mut state = self.state.lock().await;
            if let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) {
                order.status = OrderStatus::Cancelled;
            }
        }
        reply
    }

    pub async fn check_status(&self, order_id: &str) -> WebhookResponse {
        command(
            self.transport.as_ref(),
            Action::CheckStatus,
            fields([("orderId", Value::from(order_id))]),
        )
        .await
    }
}
