// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! View controllers driven through the real webhook client against a mock
//! HTTP endpoint. Each test starts its own server and is order-insensitive.

use std::sync::Arc;

use nexus_core::{Action, DataSource, OrderStatus, Platform, WebhookTransport};
use nexus_test_utils::MockTransport;
use nexus_views::{MessagesView, OrdersView, ProductsView, ViewOptions, sample};
use nexus_webhook::WebhookClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<dyn WebhookTransport> {
    Arc::new(WebhookClient::new(server.uri(), "nexus_ai_web_client", None).unwrap())
}

// ---- Orders ----

#[tokio::test]
async fn unmatched_status_maps_to_uploaded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "get_orders"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"_id": "o1", "status": "Ready_To_Ship", "total": 42, "createdAt": "2024-01-01T00:00:00Z"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let view = OrdersView::new(client_for(&server), ViewOptions::default());
    let orders = view.refresh().await;

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "o1");
    assert_eq!(orders[0].status, OrderStatus::Uploaded);
    assert!((orders[0].total_amount - 42.0).abs() < f64::EPSILON);
    assert_eq!(orders[0].customer.platform_type, Platform::Converty);
    assert_eq!(view.source().await, DataSource::Live);
}

#[tokio::test]
async fn server_error_falls_back_to_sample_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let view = OrdersView::new(client_for(&server), ViewOptions::default());
    let orders = view.refresh().await;
    assert_eq!(orders.len(), sample::orders().len());
    assert_eq!(view.source().await, DataSource::Sample);
}

// ---- Products ----

#[tokio::test]
async fn unreachable_endpoint_shows_sample_catalog() {
    // Port 9 (discard) is not listening on the test host.
    let client = WebhookClient::new("http://127.0.0.1:9/webhook", "nexus_ai_web_client", None).unwrap();
    let view = ProductsView::new(Arc::new(client), ViewOptions::default());

    let products = view.refresh().await;
    let ids: Vec<String> = products.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["PROD-1", "PROD-2", "PROD-3"]);
    assert_eq!(view.source().await, DataSource::Sample);
}

// ---- Messages ----

#[tokio::test]
async fn send_appends_message_then_ai_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "chat_message",
            "message": "Hello",
            "customerId": "CUST-1",
            "platform": "facebook",
            "source": "nexus_ai_web_client"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "ai_reply": "Hi there!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = MessagesView::new(client_for(&server), ViewOptions::default());
    view.refresh().await;
    let before = view.active().await.unwrap().messages.len();

    let outcome = view.send("Hello").await.unwrap();
    assert_eq!(outcome.reply.as_ref().unwrap().content, "Hi there!");

    let conversation = view.conversation("CUST-1").await.unwrap();
    let added = &conversation.messages[before..];
    assert_eq!(added.len(), 2);
    assert_eq!(added[0].content, "Hello");
    assert!(!added[0].is_ai_reply);
    assert_eq!(added[1].content, "Hi there!");
    assert!(added[1].is_ai_reply);
    assert_eq!(conversation.last_message, "Hi there!");
}

#[tokio::test]
async fn pending_reply_does_not_block_other_sends() {
    let mock = Arc::new(MockTransport::new());
    mock.push_reply(Action::ChatMessage, json!({"success": true, "ai_reply": "first reply"}))
        .await;
    mock.push_reply(Action::ChatMessage, json!({"success": true, "ai_reply": "second reply"}))
        .await;
    let gate = mock.gate(Action::ChatMessage).await;

    let view = Arc::new(MessagesView::new(mock.clone(), ViewOptions::default()));
    view.refresh().await;

    let first = tokio::spawn({
        let view = Arc::clone(&view);
        async move { view.send_to("CUST-1", "one").await }
    });
    while mock.calls_for(Action::ChatMessage).await.is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(view.is_sending());

    // The first reply is still held, yet the inbox stays usable.
    let conversation = view.conversation("CUST-1").await.unwrap();
    assert_eq!(conversation.messages.last().unwrap().content, "one");
    assert!(view.select("CUST-2").await.is_some());

    let second = tokio::spawn({
        let view = Arc::clone(&view);
        async move { view.send_to("CUST-1", "two").await }
    });
    while mock.calls_for(Action::ChatMessage).await.len() < 2 {
        tokio::task::yield_now().await;
    }

    gate.notify_waiters();
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
    assert!(!view.is_sending());

    let contents: Vec<String> = view
        .conversation("CUST-1")
        .await
        .unwrap()
        .messages
        .into_iter()
        .skip(3)
        .map(|m| m.content)
        .collect();
    assert_eq!(contents.len(), 4);
    let position = |text: &str| contents.iter().position(|c| c == text).unwrap();
    assert!(position("one") < position("two"));
    assert!(position("one") < position("first reply").min(position("second reply")));
    assert!(position("two") < position("first reply").max(position("second reply")));
}

#[tokio::test]
async fn refresh_during_send_keeps_message_before_reply() {
    let mock = Arc::new(MockTransport::new());
    mock.push_reply(Action::ChatMessage, json!({"success": true, "ai_reply": "Hi there!"}))
        .await;
    let gate = mock.gate(Action::ChatMessage).await;

    let view = Arc::new(MessagesView::new(mock.clone(), ViewOptions::default()));
    view.refresh().await;

    let send = tokio::spawn({
        let view = Arc::clone(&view);
        async move { view.send_to("CUST-1", "Hello").await }
    });
    while mock.calls_for(Action::ChatMessage).await.is_empty() {
        tokio::task::yield_now().await;
    }

    // The reload does not know about the pending message.
    view.refresh().await;
    let reloaded = view.conversation("CUST-1").await.unwrap();
    assert!(reloaded.messages.iter().all(|m| m.content != "Hello"));

    gate.notify_waiters();
    let outcome = send.await.unwrap().unwrap();

    let contents: Vec<String> = view
        .conversation("CUST-1")
        .await
        .unwrap()
        .messages
        .into_iter()
        .map(|m| m.content)
        .collect();
    let hello = contents.iter().position(|c| c == "Hello").unwrap();
    let reply = contents.iter().position(|c| c == "Hi there!").unwrap();
    assert!(hello < reply);
    assert_eq!(reply, contents.len() - 1);
    assert_eq!(contents.iter().filter(|c| *c == "Hello").count(), 1);
    assert_eq!(outcome.sent.content, "Hello");
}
