// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbox records: flat messages or whole conversations.

use std::collections::HashMap;

use chrono::Utc;
use nexus_core::{Conversation, Message, Platform};
use serde_json::Value;

use crate::fields::{self, Extract};
use crate::status::{DEFAULT_PLATFORM, map_platform};

const ID: &[Extract] = &[
    Extract::At(&["id"]),
    Extract::At(&["_id"]),
    Extract::At(&["messageId"]),
];
const CUSTOMER_ID: &[Extract] = &[
    Extract::At(&["customer_id"]),
    Extract::At(&["customerId"]),
    Extract::At(&["senderId"]),
    Extract::At(&["customer", "id"]),
];
const CUSTOMER_NAME: &[Extract] = &[
    Extract::At(&["customer_name"]),
    Extract::At(&["customerName"]),
    Extract::At(&["senderName"]),
    Extract::At(&["customer", "name"]),
];
const CONTENT: &[Extract] = &[
    Extract::At(&["content"]),
    Extract::At(&["message"]),
    Extract::At(&["text"]),
];
const PLATFORM: &[Extract] = &[Extract::At(&["platform"]), Extract::At(&["source"])];
const IS_AI: &[Extract] = &[Extract::At(&["is_ai_reply"]), Extract::At(&["isAiReply"])];
const AUTHOR: &[Extract] = &[Extract::At(&["from"]), Extract::At(&["role"])];
const IS_COMMENT: &[Extract] = &[Extract::At(&["is_comment"]), Extract::At(&["isComment"])];
const KIND: &[Extract] = &[Extract::At(&["type"])];
const CREATED_AT: &[Extract] = &[
    Extract::At(&["created_at"]),
    Extract::At(&["createdAt"]),
    Extract::At(&["timestamp"]),
];
const READ: &[Extract] = &[
    Extract::At(&["read"]),
    Extract::At(&["is_read"]),
    Extract::At(&["isRead"]),
];
const UNREAD_COUNT: &[Extract] = &[
    Extract::At(&["unread_count"]),
    Extract::At(&["unreadCount"]),
];
const LAST_MESSAGE: &[Extract] = &[
    Extract::At(&["last_message"]),
    Extract::At(&["lastMessage"]),
];
const LAST_MESSAGE_TIME: &[Extract] = &[
    Extract::At(&["last_message_time"]),
    Extract::At(&["lastMessageTime"]),
];

const AI_AUTHORS: &[&str] = &["ai", "assistant", "bot"];

/// Values a message falls back to when its record is silent.
#[derive(Debug, Clone)]
pub struct MessageDefaults {
    pub customer_id: String,
    pub customer_name: String,
    pub platform: Platform,
}

impl Default for MessageDefaults {
    fn default() -> Self {
        Self {
            customer_id: "unknown".to_string(),
            customer_name: "Unknown Customer".to_string(),
            platform: DEFAULT_PLATFORM,
        }
    }
}

/// Map one raw message record.
pub fn map_message(raw: &Value) -> Message {
    map_message_with(raw, &MessageDefaults::default())
}

/// Map one raw message record, filling gaps from `defaults`.
pub fn map_message_with(raw: &Value, defaults: &MessageDefaults) -> Message {
    let is_ai_reply = fields::flag(raw, IS_AI).unwrap_or_else(|| {
        fields::text(raw, AUTHOR)
            .is_some_and(|author| AI_AUTHORS.contains(&author.to_lowercase().as_str()))
    });
    let is_comment = fields::flag(raw, IS_COMMENT).unwrap_or_else(|| {
        fields::text(raw, KIND).is_some_and(|kind| kind.eq_ignore_ascii_case("comment"))
    });

    Message {
        id: fields::text(raw, ID).unwrap_or_else(|| format!("msg-{}", uuid::Uuid::new_v4())),
        platform: fields::text(raw, PLATFORM).map_or(defaults.platform, |p| map_platform(&p)),
        customer_id: fields::text(raw, CUSTOMER_ID)
            .unwrap_or_else(|| defaults.customer_id.clone()),
        customer_name: fields::text(raw, CUSTOMER_NAME)
            .unwrap_or_else(|| defaults.customer_name.clone()),
        content: fields::text(raw, CONTENT).unwrap_or_default(),
        is_ai_reply,
        is_comment,
        created_at: fields::timestamp(raw, CREATED_AT).unwrap_or_else(Utc::now),
    }
}

fn is_unread(raw: &Value) -> bool {
    fields::flag(raw, READ) == Some(false)
}

/// Group inbox records into conversations, in order of first appearance.
///
/// Records carrying a `messages` list are conversations already; anything
/// else is a single message filed under its customer id. Message order within
/// a conversation is source order.
pub fn map_conversations(records: &[Value]) -> Vec<Conversation> {
    let unknown_name = MessageDefaults::default().customer_name;
    let mut conversations: Vec<Conversation> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for raw in records.iter().filter(|r| r.is_object()) {
        let (header, messages, unread) = match raw.get("messages").and_then(Value::as_array) {
            Some(messages) => conversation_record(raw, messages),
            None => {
                let message = map_message(raw);
                let unread = u32::from(!message.is_ai_reply && is_unread(raw));
                (seed(&message), vec![message], unread)
            }
        };

        let slot = *index.entry(header.customer_id.clone()).or_insert_with(|| {
            conversations.push(header);
            conversations.len() - 1
        });

        let conv = &mut conversations[slot];
        conv.unread_count = conv.unread_count.saturating_add(unread);
        for message in messages {
            if conv.customer_name == unknown_name && !message.is_ai_reply {
                conv.customer_name = message.customer_name.clone();
            }
            conv.push(message);
        }
    }

    conversations
}

/// An empty conversation keyed on `message`'s customer.
fn seed(message: &Message) -> Conversation {
    Conversation {
        customer_id: message.customer_id.clone(),
        customer_name: if message.is_ai_reply {
            MessageDefaults::default().customer_name
        } else {
            message.customer_name.clone()
        },
        platform: message.platform,
        last_message: String::new(),
        last_message_time: message.created_at,
        unread_count: 0,
        messages: Vec::new(),
    }
}

/// Header, mapped messages and unread count of a conversation-shaped record.
fn conversation_record(raw: &Value, messages: &[Value]) -> (Conversation, Vec<Message>, u32) {
    let first = messages.first().unwrap_or(&Value::Null);
    let defaults = MessageDefaults {
        customer_id: fields::text(raw, CUSTOMER_ID)
            .or_else(|| fields::text(first, CUSTOMER_ID))
            .unwrap_or_else(|| format!("conv-{}", uuid::Uuid::new_v4())),
        customer_name: fields::text(raw, CUSTOMER_NAME)
            .unwrap_or_else(|| MessageDefaults::default().customer_name),
        platform: fields::text(raw, PLATFORM)
            .or_else(|| fields::text(first, PLATFORM))
            .map_or(DEFAULT_PLATFORM, |p| map_platform(&p)),
    };

    let mapped: Vec<Message> = messages
        .iter()
        .filter(|m| m.is_object())
        .map(|m| map_message_with(m, &defaults))
        .collect();

    let unread = match fields::count(raw, UNREAD_COUNT) {
        Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
        None => messages
            .iter()
            .filter(|m| m.is_object())
            .zip(&mapped)
            .filter(|(raw, message)| is_unread(raw) && !message.is_ai_reply)
            .count() as u32,
    };

    let header = Conversation {
        customer_id: defaults.customer_id.clone(),
        customer_name: defaults.customer_name,
        platform: defaults.platform,
        last_message: fields::text(raw, LAST_MESSAGE).unwrap_or_default(),
        last_message_time: fields::timestamp(raw, LAST_MESSAGE_TIME).unwrap_or_else(Utc::now),
        unread_count: 0,
        messages: Vec::new(),
    };
    (header, mapped, unread)
}
