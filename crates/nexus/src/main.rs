// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nexus - operator console for a webhook-driven e-commerce backend.
//!
//! Every subcommand drives one headless view controller against the
//! configured automation webhook and prints the resulting view state.

mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nexus_core::{Action, OrderStatus, Tone};
use nexus_views::MessageFilter;

/// Nexus - operator console for a webhook-driven e-commerce backend.
#[derive(Parser, Debug)]
#[command(name = "nexus", version, about, long_about = None)]
struct Cli {
    /// Print structured JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors in text output.
    #[arg(long, global = true)]
    plain: bool,

    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// KPIs, weekly revenue and channel mix.
    Dashboard,
    /// Order list.
    Orders {
        /// Show a single status (pending, attempt, rejected, delivered,
        /// cancelled, confirmed, uploaded).
        #[arg(long)]
        status: Option<OrderStatus>,
        /// Match reference, phone or customer name.
        #[arg(long)]
        search: Option<String>,
        /// Sync delivery statuses before listing.
        #[arg(long)]
        sync: bool,
    },
    /// Cancel an order.
    Cancel { order_id: String },
    /// Ask the delivery provider for an order's status.
    Check { order_id: String },
    /// Export order data.
    Export,
    /// Product catalog.
    Products,
    /// Delete a product.
    DeleteProduct { product_id: String },
    /// Conversations, and the thread of the selected one.
    Messages {
        /// Conversation to open.
        #[arg(long)]
        customer: Option<String>,
        /// Inbox filter (all, unread).
        #[arg(long, default_value_t = MessageFilter::All)]
        filter: MessageFilter,
    },
    /// Send a message to a customer and show the AI reply.
    Send { customer: String, text: String },
    /// Request a report.
    Report,
    /// Update the AI agent settings.
    Settings {
        /// Reply tone (formal, friendly, tunisian).
        #[arg(long)]
        tone: Option<Tone>,
        /// Quoted delivery delay in days (1-7).
        #[arg(long)]
        delay: Option<u8>,
        /// Send order confirmations automatically.
        #[arg(long)]
        auto_confirm: Option<bool>,
    },
    /// Send a bare action and print the raw reply.
    Ping { action: Action },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) if !path.is_file() => {
            eprintln!("nexus: config file not found: {}", path.display());
            std::process::exit(1);
        }
        Some(path) => nexus_config::load_and_validate_path(path),
        None => nexus_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            nexus_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.console.log_level);

    let output = render::Output {
        json: cli.json,
        color: !cli.plain && !cli.json && std::io::stdout().is_terminal(),
    };

    if let Err(e) = commands::run(cli.command, &config, output).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("nexus: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so text and JSON output on stdout stay clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "nexus={level},nexus_views={level},nexus_webhook={level},nexus_config={level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn orders_flags_parse() {
        let cli = Cli::try_parse_from([
            "nexus", "--json", "orders", "--status", "Delivered", "--search", "9920", "--sync",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Orders {
                status,
                search,
                sync,
            } => {
                assert_eq!(status, Some(OrderStatus::Delivered));
                assert_eq!(search.as_deref(), Some("9920"));
                assert!(sync);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn settings_accepts_tone_aliases() {
        let cli = Cli::try_parse_from(["nexus", "settings", "--tone", "tunisian", "--delay", "3"])
            .unwrap();
        match cli.command {
            Commands::Settings { tone, delay, .. } => {
                assert_eq!(tone, Some(Tone::TunisianDialect));
                assert_eq!(delay, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["nexus", "ping", "drop_tables"]).is_err());
        assert!(Cli::try_parse_from(["nexus", "ping", "get_orders"]).is_ok());
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = nexus_config::load_and_validate_str("").unwrap();
        assert_eq!(config.webhook.source, "nexus_ai_web_client");
    }
}
