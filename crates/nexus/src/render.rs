// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text and JSON output for view state.

use colored::Colorize;
use nexus_core::{
    AgentSettings, Conversation, DataSource, NexusError, Order, OrderStatus, Product,
};
use nexus_views::{DashboardSnapshot, SendOutcome};
use nexus_webhook::WebhookResponse;
use serde::Serialize;
use serde_json::Value;

const CURRENCY: &str = "TND";

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

/// List output for `--json` mode.
#[derive(Debug, Serialize)]
struct Listing<'a, T> {
    source: DataSource,
    items: &'a [T],
}

fn print_json<T: Serialize>(value: &T) -> Result<(), NexusError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| NexusError::Internal(format!("failed to encode output: {e}")))?;
    println!("{text}");
    Ok(())
}

fn money(amount: f64) -> String {
    format!("{amount:.2} {CURRENCY}")
}

/// Growth figure with sign, or `n/a` without a baseline.
fn growth(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1}%"),
        None => "n/a".to_string(),
    }
}

fn header(title: &str, source: DataSource, color: bool) {
    println!();
    if source == DataSource::Sample {
        let note = "(sample data)";
        if color {
            println!("  {title} {}", note.yellow());
        } else {
            println!("  {title} {note}");
        }
    } else {
        println!("  {title}");
    }
    println!("  {}", "-".repeat(48));
}

fn status_label(status: OrderStatus, color: bool) -> String {
    let text = format!("{:<9}", status.to_string());
    if !color {
        return text;
    }
    match status {
        OrderStatus::Delivered => text.green().to_string(),
        OrderStatus::Cancelled => text.red().to_string(),
        OrderStatus::Pending => text.yellow().to_string(),
        OrderStatus::Attempt => text.bright_yellow().to_string(),
        OrderStatus::Confirmed => text.blue().to_string(),
        OrderStatus::Uploaded => text.purple().to_string(),
        OrderStatus::Rejected => text.dimmed().to_string(),
    }
}

/// Stock badge as shown on a product card.
fn stock_label(product: &Product) -> String {
    if product.is_out_of_stock() {
        match &product.estimated_restock_date {
            Some(date) => format!("out of stock (restock {date})"),
            None => "out of stock".to_string(),
        }
    } else if product.is_low_stock() {
        format!("low stock: {}", product.stock)
    } else {
        format!("stock: {}", product.stock)
    }
}

pub fn dashboard(snapshot: &DashboardSnapshot, out: Output) -> Result<(), NexusError> {
    if out.json {
        return print_json(snapshot);
    }
    let kpi = &snapshot.kpi;
    header("nexus dashboard", snapshot.source, out.color);
    println!(
        "    Revenue:           {} ({})",
        money(kpi.revenue),
        growth(kpi.revenue_growth)
    );
    println!(
        "    Orders:            {} ({})",
        kpi.orders,
        growth(kpi.orders_growth)
    );
    match kpi.ai_handled_rate {
        Some(rate) => println!("    AI handled:        {rate:.0}%"),
        None => println!("    AI handled:        n/a"),
    }
    println!("    Pending shipments: {}", kpi.pending_shipments);

    println!();
    println!("    Last {} days", snapshot.chart.len());
    for point in &snapshot.chart {
        println!(
            "      {:<4} {:>14} {:>6} orders",
            point.label,
            money(point.revenue),
            point.orders
        );
    }

    println!();
    println!("    Channels");
    for share in &snapshot.platforms {
        println!("      {:<10} {:>5.1}%", share.platform.to_string(), share.percent);
    }
    println!();
    Ok(())
}

pub fn orders(orders: &[Order], source: DataSource, out: Output) -> Result<(), NexusError> {
    if out.json {
        return print_json(&Listing {
            source,
            items: orders,
        });
    }
    header("nexus orders", source, out.color);
    if orders.is_empty() {
        println!("    No orders match.");
    }
    for order in orders {
        println!(
            "    {:<8} {} {:<20} {:<16} {:>14} {:>3} items  {}",
            order.external_ref,
            status_label(order.status, out.color),
            order.customer.name,
            order.customer.phone,
            money(order.total_amount),
            order.items_count,
            order.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    println!();
    Ok(())
}

pub fn products(products: &[Product], source: DataSource, out: Output) -> Result<(), NexusError> {
    if out.json {
        return print_json(&Listing {
            source,
            items: products,
        });
    }
    header("nexus products", source, out.color);
    for product in products {
        let stock = stock_label(product);
        let stock = match (out.color, product.is_out_of_stock(), product.is_low_stock()) {
            (true, true, _) => stock.red().to_string(),
            (true, _, true) => stock.yellow().to_string(),
            (true, _, _) => stock.green().to_string(),
            (false, _, _) => stock,
        };
        println!(
            "    {:<10} {:<40} {:>14}  {}",
            product.id,
            product.name,
            money(product.price),
            stock
        );
    }
    println!();
    Ok(())
}

pub fn inbox(
    conversations: &[Conversation],
    active: Option<&Conversation>,
    source: DataSource,
    out: Output,
) -> Result<(), NexusError> {
    if out.json {
        #[derive(Serialize)]
        struct Inbox<'a> {
            source: DataSource,
            conversations: &'a [Conversation],
            active: Option<&'a str>,
        }
        return print_json(&Inbox {
            source,
            conversations,
            active: active.map(|c| c.customer_id.as_str()),
        });
    }

    header("nexus messages", source, out.color);
    for conv in conversations {
        let marker = if active.is_some_and(|a| a.customer_id == conv.customer_id) {
            ">"
        } else {
            " "
        };
        let unread = if conv.unread_count > 0 {
            format!(" [{} new]", conv.unread_count)
        } else {
            String::new()
        };
        println!(
            "  {marker} {:<20} {:<10} {}{unread}",
            conv.customer_name,
            conv.platform.to_string(),
            conv.last_message
        );
    }

    if let Some(conv) = active {
        println!();
        println!("    {} ({})", conv.customer_name, conv.customer_id);
        for message in &conv.messages {
            let author = if message.is_ai_reply {
                if out.color {
                    "AI".cyan().to_string()
                } else {
                    "AI".to_string()
                }
            } else {
                message.customer_name.clone()
            };
            let kind = if message.is_comment { " (comment)" } else { "" };
            println!(
                "      {} {author}{kind}: {}",
                message.created_at.format("%H:%M"),
                message.content
            );
        }
    }
    println!();
    Ok(())
}

pub fn sent(outcome: &SendOutcome, out: Output) -> Result<(), NexusError> {
    if out.json {
        return print_json(outcome);
    }
    println!("  you: {}", outcome.sent.content);
    match &outcome.reply {
        Some(reply) if out.color => println!("  {}: {}", "AI".cyan(), reply.content),
        Some(reply) => println!("  AI: {}", reply.content),
        None => println!("  (no AI reply)"),
    }
    Ok(())
}

pub fn reply(label: &str, reply: &WebhookResponse, out: Output) -> Result<(), NexusError> {
    if out.json {
        return print_json(reply);
    }
    let detail = reply
        .message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default();
    match (reply.success, out.color) {
        (true, true) => println!("  {} {label} triggered{detail}", "✓".green()),
        (true, false) => println!("  [OK] {label} triggered{detail}"),
        (false, true) => println!("  {} {label} failed{detail}", "✗".red()),
        (false, false) => println!("  [FAIL] {label} failed{detail}"),
    }
    Ok(())
}

pub fn settings(
    settings: &AgentSettings,
    saved: &WebhookResponse,
    out: Output,
) -> Result<(), NexusError> {
    if out.json {
        #[derive(Serialize)]
        struct Saved<'a> {
            settings: &'a AgentSettings,
            saved: bool,
        }
        return print_json(&Saved {
            settings,
            saved: saved.success,
        });
    }
    println!();
    println!("  nexus agent settings");
    println!("  {}", "-".repeat(48));
    println!(
        "    Tone:           {} ({})",
        settings.tone,
        settings.tone.description()
    );
    println!("    Delivery delay: {} days", settings.delivery_delay_days);
    println!(
        "    Auto-confirm:   {}",
        if settings.auto_confirm { "on" } else { "off" }
    );
    println!();
    reply("settings update", saved, out)
}

pub fn raw(value: &Value) -> Result<(), NexusError> {
    print_json(value)
}
