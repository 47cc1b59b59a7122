// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product catalog screen.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nexus_core::{Action, DataSource, Product, WebhookTransport};
use nexus_mapping::map_products;
use nexus_webhook::WebhookResponse;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{InFlight, ViewOptions, command, fetch_records, fields, sample};

/// Fields for a product created from the console.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug)]
struct CatalogState {
    products: Vec<Product>,
    source: DataSource,
}

/// Controller for the products screen.
pub struct ProductsView {
    transport: Arc<dyn WebhookTransport>,
    options: ViewOptions,
    state: Mutex<CatalogState>,
    syncing: AtomicUsize,
}

impl ProductsView {
    pub fn new(transport: Arc<dyn WebhookTransport>, options: ViewOptions) -> Self {
        Self {
            transport,
            options,
            state: Mutex::new(CatalogState {
                products: Vec::new(),
                source: DataSource::Sample,
            }),
            syncing: AtomicUsize::new(0),
        }
    }

    /// Reload the catalog.
    ///
    /// When the endpoint answers with orders instead of products, the
    /// catalog is derived from their carts.
    pub async fn refresh(&self) -> Vec<Product> {
        let records = fetch_records(self.transport.as_ref(), Action::GetProducts).await;
        let mapped = map_products(&records);
        let (products, source) = if mapped.is_empty() && self.options.fallback_to_samples {
            (sample::products(), DataSource::Sample)
        } else {
            (mapped, DataSource::Live)
        };
        info!(count = products.len(), source = %source, "products refreshed");

        let mut state = self.state.lock().await;
        state.products = products.clone();
        state.source = source;
        products
    }

    /// Refetch with the syncing indicator raised.
    pub async fn sync(&self) -> Vec<Product> {
        let _syncing = InFlight::enter(&self.syncing);
        self.refresh().await
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire) > 0
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.lock().await.products.clone()
    }

    pub async fn source(&self) -> DataSource {
        self.state.lock().await.source
    }

    /// Create a product, reloading the catalog when the endpoint accepts it.
    pub async fn add(&self, product: &NewProduct) -> WebhookResponse {
        let body = match serde_json::to_value(product) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "could not encode product");
                return WebhookResponse {
                    success: false,
                    message: Some(e.to_string()),
                    ai_reply: None,
                };
            }
        };
        let reply = command(
            self.transport.as_ref(),
            Action::AddProduct,
            fields([("product", body)]),
        )
        .await;
        if reply.success {
            self.refresh().await;
        }
        reply
    }

    /// Send `changes` for one product.
    pub async fn update(&self, product_id: &str, changes: Map<String, Value>) -> WebhookResponse {
        let mut request = fields([("productId", Value::from(product_id))]);
        for (key, value) in changes {
            request.entry(key).or_insert(value);
        }
        command(self.transport.as_ref(), Action::UpdateProduct, request).await
    }

    /// Delete one product; the local copy goes away only on success.
    pub async fn delete(&self, product_id: &str) -> WebhookResponse {
        let reply = command(
            self.transport.as_ref(),
            Action::DeleteProduct,
            fields([("productId", Value::from(product_id))]),
        )
        .await;
        if reply.success {
            self.state
                .lock()
                .await
                .products
                .retain(|p| p.id != product_id);
        }
        reply
    }
}
