// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command builds the view controller it needs over one shared webhook
//! client, runs the operation and hands the resulting state to [`render`].

use std::sync::Arc;

use nexus_config::NexusConfig;
use nexus_core::{NexusError, WebhookTransport};
use nexus_views::{
    DashboardView, MessageFilter, MessagesView, OrdersView, ProductsView, SettingsView,
    ViewOptions,
};
use nexus_webhook::WebhookClient;
use serde_json::Map;
use tracing::debug;

use crate::Commands;
use crate::render::{self, Output};

pub async fn run(command: Commands, config: &NexusConfig, out: Output) -> Result<(), NexusError> {
    let client = WebhookClient::from_config(&config.webhook)?;
    debug!(url = client.url(), "webhook client ready");
    let transport: Arc<dyn WebhookTransport> = Arc::new(client);
    let options = ViewOptions::from(&config.console);

    match command {
        Commands::Dashboard => {
            let view = DashboardView::new(transport, options);
            render::dashboard(&view.refresh().await, out)
        }
        Commands::Orders {
            status,
            search,
            sync,
        } => {
            let view = OrdersView::new(transport, options);
            if sync {
                view.sync().await;
            } else {
                view.refresh().await;
            }
            if status.is_some() {
                view.filter(status).await;
            }
            if let Some(query) = search {
                view.search(&query).await;
            }
            render::orders(&view.visible().await, view.source().await, out)
        }
        Commands::Cancel { order_id } => {
            let view = OrdersView::new(transport, options);
            render::reply("cancel order", &view.cancel(&order_id).await, out)
        }
        Commands::Check { order_id } => {
            let view = OrdersView::new(transport, options);
            render::reply("check status", &view.check_status(&order_id).await, out)
        }
        Commands::Export => {
            let view = OrdersView::new(transport, options);
            render::reply("export data", &view.export().await, out)
        }
        Commands::Products => {
            let view = ProductsView::new(transport, options);
            let products = view.refresh().await;
            render::products(&products, view.source().await, out)
        }
        Commands::DeleteProduct { product_id } => {
            let view = ProductsView::new(transport, options);
            render::reply("delete product", &view.delete(&product_id).await, out)
        }
        Commands::Messages { customer, filter } => {
            let view = MessagesView::new(transport, options);
            view.refresh().await;
            if let Some(id) = &customer {
                if view.select(id).await.is_none() {
                    return Err(unknown_customer(id));
                }
            }
            if filter != MessageFilter::All {
                view.filter(filter).await;
            }
            render::inbox(
                &view.visible().await,
                view.active().await.as_ref(),
                view.source().await,
                out,
            )
        }
        Commands::Send { customer, text } => {
            let view = MessagesView::new(transport, options);
            view.refresh().await;
            let outcome = view
                .send_to(&customer, &text)
                .await
                .ok_or_else(|| unknown_customer(&customer))?;
            render::sent(&outcome, out)
        }
        Commands::Report => {
            let view = DashboardView::new(transport, options);
            let reply = view.generate_report().await?;
            render::reply("report generation", &reply, out)
        }
        Commands::Settings {
            tone,
            delay,
            auto_confirm,
        } => {
            let view = SettingsView::new(transport);
            if let Some(tone) = tone {
                view.set_tone(tone).await;
            }
            if let Some(days) = delay {
                view.set_delivery_delay(days).await;
            }
            if let Some(enabled) = auto_confirm {
                view.set_auto_confirm(enabled).await;
            }
            let reply = view.save().await;
            render::settings(&view.settings().await, &reply, out)
        }
        Commands::Ping { action } => {
            let raw = transport.trigger(action, Map::new()).await;
            render::raw(&raw)
        }
    }
}

fn unknown_customer(id: &str) -> NexusError {
    NexusError::Internal(format!("no conversation with customer '{id}'"))
}
