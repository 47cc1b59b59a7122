// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging inbox with optimistic sends.
//!
//! Sending appends the operator's message to the conversation right away,
//! then posts it with `chat_message`. The state lock is released before the
//! request goes out, so other sends and selections proceed while replies are
//! pending; [`MessagesView::is_sending`] reports whether any are.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use nexus_core::{Action, Conversation, DataSource, Message, WebhookTransport};
use nexus_mapping::map_conversations;
use nexus_webhook::WebhookResponse;
use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumString};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{InFlight, ViewOptions, command, fetch_records, fields, sample};

/// Author name on messages the operator sends.
const OPERATOR_NAME: &str = "You";
/// Author name on AI replies.
const AGENT_NAME: &str = "AI Agent";

/// Inbox filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MessageFilter {
    #[default]
    All,
    Unread,
}

/// Messages added to a conversation by one send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendOutcome {
    pub sent: Message,
    pub reply: Option<Message>,
}

#[derive(Debug)]
struct InboxState {
    conversations: Vec<Conversation>,
    active: Option<String>,
    filter: MessageFilter,
    source: DataSource,
}

impl InboxState {
    fn conversation_mut(&mut self, customer_id: &str) -> Option<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.customer_id == customer_id)
    }
}

/// Controller for the messaging screen.
pub struct MessagesView {
    transport: Arc<dyn WebhookTransport>,
    options: ViewOptions,
    state: Mutex<InboxState>,
    in_flight: AtomicUsize,
}

impl MessagesView {
    pub fn new(transport: Arc<dyn WebhookTransport>, options: ViewOptions) -> Self {
        Self {
            transport,
            options,
            state: Mutex::new(InboxState {
                conversations: Vec::new(),
                active: None,
                filter: MessageFilter::All,
                source: DataSource::Sample,
            }),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Reload conversations.
    ///
    /// The active conversation is kept when it still exists, otherwise the
    /// first conversation becomes active.
    pub async fn refresh(&self) -> Vec<Conversation> {
        let records = fetch_records(self.transport.as_ref(), Action::GetMessages).await;
        let (conversations, source) = if records.is_empty() && self.options.fallback_to_samples {
            (sample::conversations(), DataSource::Sample)
        } else {
            (map_conversations(&records), DataSource::Live)
        };
        info!(count = conversations.len(), source = %source, "conversations refreshed");

        let mut state = self.state.lock().await;
        let keep_active = state
            .active
            .as_deref()
            .is_some_and(|id| conversations.iter().any(|c| c.customer_id == id));
        if !keep_active {
            state.active = conversations.first().map(|c| c.customer_id.clone());
        }
        state.conversations = conversations.clone();
        state.source = source;
        conversations
    }

    pub async fn source(&self) -> DataSource {
        self.state.lock().await.source
    }

    /// Make `customer_id`'s conversation active.
    pub async fn select(&self, customer_id: &str) -> Option<Conversation> {
        let mut state = self.state.lock().await;
        let found = state.conversation_mut(customer_id).cloned();
        if found.is_some() {
            state.active = Some(customer_id.to_string());
        }
        found
    }

    pub async fn active(&self) -> Option<Conversation> {
        let state = self.state.lock().await;
        let id = state.active.as_deref()?;
        state.conversations.iter().find(|c| c.customer_id == id).cloned()
    }

    pub async fn conversation(&self, customer_id: &str) -> Option<Conversation> {
        self.state
            .lock()
            .await
            .conversations
            .iter()
            .find(|c| c.customer_id == customer_id)
            .cloned()
    }

    /// Whether any send is still waiting for its reply.
    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Send `text` to the active conversation.
    pub async fn send(&self, text: &str) -> Option<SendOutcome> {
        let active = self.state.lock().await.active.clone()?;
        self.send_to(&active, text).await
    }

    /// Send `text` to `customer_id`'s conversation.
    ///
    /// Blank text or an unknown customer is a no-op returning `None`. The
    /// operator's message is visible in the conversation before the request
    /// is issued; an AI reply, when the endpoint returns one, lands after it.
    /// A refresh that drops the pending message while the reply is awaited
    /// gets it put back ahead of the reply.
    pub async fn send_to(&self, customer_id: &str, text: &str) -> Option<SendOutcome> {
        if text.trim().is_empty() {
            return None;
        }

        let sent = {
            let mut state = self.state.lock().await;
            let conversation = state.conversation_mut(customer_id)?;
            let sent = Message {
                id: format!("local-{}", Uuid::new_v4()),
                platform: conversation.platform,
                customer_id: conversation.customer_id.clone(),
                customer_name: OPERATOR_NAME.to_string(),
                content: text.to_string(),
                is_ai_reply: false,
                is_comment: false,
                created_at: Utc::now(),
            };
            conversation.push(sent.clone());
            sent
        };
        let _sending = InFlight::enter(&self.in_flight);
        debug!(customer_id, "message queued");

        let raw = self
            .transport
            .trigger(
                Action::ChatMessage,
                fields([
                    ("message", Value::from(text)),
                    ("customerId", Value::from(customer_id)),
                    ("platform", Value::String(sent.platform.to_string())),
                ]),
            )
            .await;
        let response = WebhookResponse::from_value(&raw);

        let mut state = self.state.lock().await;
        let reply = response.reply().map(|content| Message {
            id: format!("ai-{}", Uuid::new_v4()),
            platform: sent.platform,
            customer_id: sent.customer_id.clone(),
            customer_name: AGENT_NAME.to_string(),
            content: content.to_string(),
            is_ai_reply: true,
            is_comment: false,
            created_at: Utc::now(),
        });
        if let Some(reply) = &reply {
            if let Some(conversation) = state.conversation_mut(customer_id) {
                if !conversation.messages.iter().any(|m| m.id == sent.id) {
                    debug!(customer_id, "restoring message dropped by refresh");
                    conversation.push(sent.clone());
                }
                conversation.push(reply.clone());
            }
        }
        info!(
            customer_id,
            success = response.success,
            ai_reply = reply.is_some(),
            "message sent"
        );

        Some(SendOutcome { sent, reply })
    }

    /// Ask the endpoint to phone the active conversation's customer.
    pub async fn call_customer(&self) -> Option<WebhookResponse> {
        self.active_action(Action::CallCustomer).await
    }

    /// Open the endpoint-side options for the active conversation.
    pub async fn chat_options(&self) -> Option<WebhookResponse> {
        self.active_action(Action::ChatOptions).await
    }

    async fn active_action(&self, action: Action) -> Option<WebhookResponse> {
        let customer_id = self.state.lock().await.active.clone()?;
        Some(
            command(
                self.transport.as_ref(),
                action,
                fields([("customerId", Value::String(customer_id))]),
            )
            .await,
        )
    }

    /// Switch the inbox filter and tell the endpoint.
    pub async fn filter(&self, filter: MessageFilter) -> Vec<Conversation> {
        self.state.lock().await.filter = filter;
        command(
            self.transport.as_ref(),
            Action::FilterMessages,
            fields([("filter", Value::String(filter.to_string()))]),
        )
        .await;
        self.visible().await
    }

    /// Conversations passing the current filter.
    pub async fn visible(&self) -> Vec<Conversation> {
        let state = self.state.lock().await;
        state
            .conversations
            .iter()
            .filter(|c| match state.filter {
                MessageFilter::All => true,
                MessageFilter::Unread => c.unread_count > 0,
            })
            .cloned()
            .collect()
    }
}
