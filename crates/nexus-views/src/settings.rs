// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI agent settings screen.

use std::sync::Arc;

use nexus_core::{Action, AgentSettings, Tone, WebhookTransport};
use nexus_webhook::WebhookResponse;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use crate::{command, fields};

/// Allowed delivery delays, in days.
pub const DELAY_RANGE: std::ops::RangeInclusive<u8> = 1..=7;

/// Controller for the settings screen. Settings live only in this session
/// until saved to the endpoint.
pub struct SettingsView {
    transport: Arc<dyn WebhookTransport>,
    settings: Mutex<AgentSettings>,
}

impl SettingsView {
    pub fn new(transport: Arc<dyn WebhookTransport>) -> Self {
        Self {
            transport,
            settings: Mutex::new(AgentSettings::default()),
        }
    }

    pub async fn settings(&self) -> AgentSettings {
        self.settings.lock().await.clone()
    }

    /// Change the reply tone; takes effect on the endpoint immediately.
    pub async fn set_tone(&self, tone: Tone) -> WebhookResponse {
        self.settings.lock().await.tone = tone;
        info!(tone = %tone, "tone changed");
        command(
            self.transport.as_ref(),
            Action::UpdateSettings,
            fields([
                ("setting", Value::from("tone")),
                ("value", Value::String(tone.to_string())),
            ]),
        )
        .await
    }

    /// Set the quoted delivery delay, clamped to one week.
    pub async fn set_delivery_delay(&self, days: u8) -> u8 {
        let days = days.clamp(*DELAY_RANGE.start(), *DELAY_RANGE.end());
        self.settings.lock().await.delivery_delay_days = days;
        days
    }

    pub async fn set_auto_confirm(&self, enabled: bool) {
        self.settings.lock().await.auto_confirm = enabled;
    }

    /// Push the full settings set to the endpoint.
    pub async fn save(&self) -> WebhookResponse {
        let settings = self.settings().await;
        let reply = command(
            self.transport.as_ref(),
            Action::UpdateSettings,
            fields([
                ("tone", Value::String(settings.tone.to_string())),
                ("delay", Value::from(settings.delivery_delay_days)),
                ("autoConfirm", Value::Bool(settings.auto_confirm)),
            ]),
        )
        .await;
        info!(success = reply.success, "settings saved");
        reply
    }
}
