// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted webhook transport for deterministic view-controller tests.
//!
//! Replies are queued per action and popped FIFO. When an action's queue is
//! empty the transport answers with the fallback reply, which by default is
//! the uniform failure envelope an unreachable endpoint would produce.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use nexus_core::{Action, WebhookTransport};
use serde_json::{Map, Value, json};
use tokio::sync::{Mutex, Notify};

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub action: Action,
    pub fields: Map<String, Value>,
}

/// A webhook transport with pre-configured replies.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<Action, VecDeque<Value>>>,
    fallback: Mutex<Option<Value>>,
    calls: Mutex<Vec<RecordedCall>>,
    gates: Mutex<HashMap<Action, Arc<Notify>>>,
}

impl MockTransport {
    /// A transport that fails every call like a refused connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`MockTransport::new`] that reads better in tests.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// A transport answering every otherwise unscripted call with `reply`.
    pub fn with_fallback(reply: Value) -> Self {
        Self {
            fallback: Mutex::new(Some(reply)),
            ..Self::default()
        }
    }

    /// Queue `reply` for the next call of `action`.
    pub async fn push_reply(&self, action: Action, reply: Value) {
        self.replies
            .lock()
            .await
            .entry(action)
            .or_default()
            .push_back(reply);
    }

    /// Hold every call of `action` until the returned handle is notified.
    ///
    /// Use `notify_waiters` to release every call already recorded.
    pub async fn gate(&self, action: Action) -> Arc<Notify> {
        self.gates
            .lock()
            .await
            .entry(action)
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Calls of one action, in order.
    pub async fn calls_for(&self, action: Action) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.action == action)
            .cloned()
            .collect()
    }

    async fn next_reply(&self, action: Action) -> Value {
        if let Some(reply) = self
            .replies
            .lock()
            .await
            .get_mut(&action)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }
        self.fallback.lock().await.clone().unwrap_or_else(|| {
            json!({"success": false, "message": "error sending request: connection refused"})
        })
    }
}

#[async_trait]
impl WebhookTransport for MockTransport {
    async fn trigger(&self, action: Action, fields: Map<String, Value>) -> Value {
        let gate = self.gates.lock().await.get(&action).cloned();
        // Register with the gate before the call becomes observable.
        let released = gate.as_ref().map(|gate| gate.notified());

        self.calls.lock().await.push(RecordedCall { action, fields });
        tracing::debug!(action = %action, "mock transport call");

        if let Some(released) = released {
            released.await;
        }
        self.next_reply(action).await
    }
}
