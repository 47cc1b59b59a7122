// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for the action-tagged webhook endpoint.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::action::Action;

/// Anything that can deliver an action to the automation webhook.
///
/// `trigger` never fails: transport and status errors come back as the
/// uniform envelope `{"success": false, "message": "..."}` so callers only
/// ever inspect one shape.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Sends `action` with `fields` merged into the request envelope.
    async fn trigger(&self, action: Action, fields: Map<String, Value>) -> Value;
}
