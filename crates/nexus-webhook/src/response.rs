// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The few envelope fields the console reads from a webhook reply.

use serde::Serialize;
use serde_json::{Value, json};

use crate::normalize::is_truthy;

/// Typed view over a raw reply's `success`, `message` and `ai_reply` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: Option<String>,
    /// AI-generated answer, only set for `chat_message`.
    pub ai_reply: Option<String>,
}

impl WebhookResponse {
    /// Read the envelope out of `raw`.
    ///
    /// Batched replies (`[{...}]`) are read from their first element.
    pub fn from_value(raw: &Value) -> Self {
        let envelope = match raw {
            Value::Array(items) => items.first().unwrap_or(&Value::Null),
            other => other,
        };
        Self {
            success: envelope.get("success").is_some_and(is_truthy),
            message: non_empty_str(envelope.get("message")),
            ai_reply: non_empty_str(envelope.get("ai_reply")),
        }
    }

    /// The AI reply, if the call succeeded and produced one.
    pub fn reply(&self) -> Option<&str> {
        if self.success {
            self.ai_reply.as_deref()
        } else {
            None
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// The uniform failure envelope every error is converted to.
pub fn failure(message: impl Into<String>) -> Value {
    json!({ "success": false, "message": message.into() })
}

/// Envelope for a plain-text success reply.
pub fn text_success(text: impl Into<String>) -> Value {
    json!({ "success": true, "message": text.into() })
}
