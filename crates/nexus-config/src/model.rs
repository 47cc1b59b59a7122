// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Nexus operator console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Nexus configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NexusConfig {
    /// Automation webhook endpoint settings.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Console behaviour settings.
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Automation webhook endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    /// Full URL of the single POST endpoint.
    #[serde(default = "default_webhook_url")]
    pub url: String,

    /// Client identifier sent as `source` in every request envelope.
    #[serde(default = "default_source")]
    pub source: String,

    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: default_webhook_url(),
            source: default_source(),
            timeout_secs: None,
        }
    }
}

fn default_webhook_url() -> String {
    "http://localhost:5678/webhook/nexus".to_string()
}

fn default_source() -> String {
    "nexus_ai_web_client".to_string()
}

/// Console behaviour configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Show the built-in sample data when the webhook returns nothing.
    #[serde(default = "default_fallback_to_samples")]
    pub fallback_to_samples: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            fallback_to_samples: default_fallback_to_samples(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_to_samples() -> bool {
    true
}
