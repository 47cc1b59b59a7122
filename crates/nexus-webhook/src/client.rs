// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the automation webhook.
//!
//! Every call is one POST of `{source, timestamp, action, ...fields}` to the
//! configured URL. There are no retries; callers decide what a failure means.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use nexus_config::model::WebhookConfig;
use nexus_core::{Action, NexusError, WebhookTransport};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::response;

/// Client for the single action-tagged webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
    source: String,
}

impl WebhookClient {
    /// Creates a client posting to `url`, identifying itself as `source`.
    ///
    /// Without a `timeout` the transport default applies.
    pub fn new(
        url: impl Into<String>,
        source: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, NexusError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| NexusError::Config(format!(
            "failed to build HTTP client: {e}"
        )))?;

        Ok(Self {
            client,
            url: url.into(),
            source: source.into(),
        })
    }

    /// Creates a client from the `[webhook]` configuration section.
    pub fn from_config(config: &WebhookConfig) -> Result<Self, NexusError> {
        Self::new(
            config.url.clone(),
            config.source.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Builds the request body for `action`.
    ///
    /// `fields` may replace `source` or `timestamp` but never `action`.
    pub fn envelope(&self, action: Action, fields: Map<String, Value>) -> Value {
        let mut body = Map::new();
        body.insert("source".into(), Value::String(self.source.clone()));
        body.insert(
            "timestamp".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        body.extend(fields);
        body.insert("action".into(), Value::String(action.as_str().to_string()));
        Value::Object(body)
    }

    /// Posts `action` and returns the raw reply.
    ///
    /// JSON replies are returned as parsed; anything else is wrapped as
    /// `{"success": true, "message": <text>}`.
    pub async fn send(&self, action: Action, fields: Map<String, Value>) -> Result<Value, NexusError> {
        let body = self.envelope(action, fields);
        debug!(action = %action, url = %self.url, "posting webhook action");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NexusError::Transport {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(action = %action, status = %status, "webhook response received");
        if !status.is_success() {
            return Err(NexusError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        if is_json {
            response
                .json::<Value>()
                .await
                .map_err(|e| NexusError::Decode { source: Box::new(e) })
        } else {
            let text = response.text().await.map_err(|e| NexusError::Transport {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            Ok(response::text_success(text))
        }
    }
}

#[async_trait]
impl WebhookTransport for WebhookClient {
    async fn trigger(&self, action: Action, fields: Map<String, Value>) -> Value {
        match self.send(action, fields).await {
            Ok(value) => value,
            Err(e) => {
                error!(action = %action, error = %e, "failed to trigger webhook");
                response::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> WebhookClient {
        WebhookClient::new(format!("{base_url}/webhook/test"), "nexus_test", None).unwrap()
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn envelope_merges_fields_and_pins_action() {
        let client = WebhookClient::new("http://localhost/hook", "nexus_test", None).unwrap();
        let body = client.envelope(
            Action::ChatMessage,
            fields(json!({"message": "Hello", "customerId": "c1", "action": "delete_product"})),
        );
        assert_eq!(body["source"], "nexus_test");
        assert_eq!(body["action"], "chat_message");
        assert_eq!(body["message"], "Hello");
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "bad timestamp {ts}");
    }

    #[tokio::test]
    async fn send_posts_envelope_and_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/test"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({"action": "get_orders", "source": "nexus_test"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let value = test_client(&server.uri())
            .send(Action::GetOrders, Map::new())
            .await
            .unwrap();
        assert_eq!(value, json!({"success": true, "data": []}));
    }

    #[tokio::test]
    async fn text_reply_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
            .mount(&server)
            .await;

        let value = test_client(&server.uri())
            .send(Action::SyncOrders, Map::new())
            .await
            .unwrap();
        assert_eq!(value, json!({"success": true, "message": "Workflow was started"}));
    }

    #[tokio::test]
    async fn non_success_status_is_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .send(Action::GetProducts, Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, NexusError::HttpStatus { status: 404, .. }), "got {err:?}");
        assert_eq!(err.to_string(), "webhook error: 404 Not Found");
    }

    #[tokio::test]
    async fn no_retry_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let value = test_client(&server.uri())
            .trigger(Action::GetDashboardData, Map::new())
            .await;
        assert_eq!(value["success"], false);
        assert!(value["message"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn trigger_converts_connection_refused() {
        // Nothing listens on port 9 of localhost.
        let client = WebhookClient::new(
            "http://127.0.0.1:9/webhook",
            "nexus_test",
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let value = client.trigger(Action::GetProducts, Map::new()).await;
        assert_eq!(value["success"], false);
        assert!(value["message"].as_str().is_some_and(|m| !m.is_empty()));
        assert!(logs_contain("failed to trigger webhook"));
    }

    #[tokio::test]
    async fn malformed_json_is_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send(Action::GetMessages, Map::new()).await.unwrap_err();
        assert!(matches!(err, NexusError::Decode { .. }));
        let value = client.trigger(Action::GetMessages, Map::new()).await;
        assert_eq!(value["success"], false);
    }

    #[test]
    fn from_config_uses_section_values() {
        let config = WebhookConfig {
            url: "https://hooks.example.com/x".into(),
            source: "ops".into(),
            timeout_secs: Some(10),
        };
        let client = WebhookClient::from_config(&config).unwrap();
        assert_eq!(client.url(), "https://hooks.example.com/x");
        assert_eq!(client.envelope(Action::ExportData, Map::new())["source"], "ops");
    }
}
