// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattens the many response shapes the automation webhook produces into one
//! ordered list of records.
//!
//! Observed shapes:
//!
//! | shape | example |
//! |---|---|
//! | batch of responses | `[ {...}, {...} ]` |
//! | page | `{"success": true, "count": 530, "data": [...]}` |
//! | page container | `{"data": [{"success": true, "data": [...]}, ...]}` |
//! | body wrapper | `{"body": {"data": [...]}}` |
//! | plain wrapper | `{"data": [...]}` |
//! | bare record | `{"_id": "o1", ...}` |
//!
//! Anything else is [`WireShape::Unrecognized`] and yields no records.

use serde_json::{Map, Value};

/// One record as delivered by the webhook.
pub type Record = Value;

/// Structural classification of a webhook payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireShape<'a> {
    /// Top-level array; every element is normalized on its own.
    Batch(&'a [Value]),
    /// `{success: truthy, data: [...]}`.
    Page(&'a [Value]),
    /// `{data: [...]}` whose first element has a truthy `success`.
    PageContainer(&'a [Value]),
    /// `{body: {data: [...]}}`.
    Body(&'a [Value]),
    /// `{data: [...]}` with no page markers.
    Wrapped(&'a [Value]),
    /// An object that is itself a record.
    Record(&'a Map<String, Value>),
    Unrecognized,
}

/// Keys whose truthy presence marks an object as a record.
const RECORD_MARKERS: &[&str] = &["_id", "id", "customer", "name", "content"];

impl<'a> WireShape<'a> {
    /// Classify `value`; the order of checks is the precedence of the shapes.
    pub fn classify(value: &'a Value) -> Self {
        let obj = match value {
            Value::Array(items) => return Self::Batch(items),
            Value::Object(obj) => obj,
            _ => return Self::Unrecognized,
        };

        let data = obj.get("data").and_then(Value::as_array);

        if let Some(items) = data {
            if obj.get("success").is_some_and(is_truthy) {
                return Self::Page(items);
            }
            if items
                .first()
                .and_then(|first| first.get("success"))
                .is_some_and(is_truthy)
            {
                return Self::PageContainer(items);
            }
        }

        if let Some(items) = obj
            .get("body")
            .and_then(|body| body.get("data"))
            .and_then(Value::as_array)
        {
            return Self::Body(items);
        }

        if let Some(items) = data {
            return Self::Wrapped(items);
        }

        if RECORD_MARKERS
            .iter()
            .any(|key| obj.get(*key).is_some_and(is_truthy))
        {
            return Self::Record(obj);
        }

        Self::Unrecognized
    }
}

/// Extract every record embedded in `response`, preserving source order.
///
/// Never fails: unknown shapes produce an empty list.
pub fn extract(response: &Value) -> Vec<Record> {
    let mut out = Vec::new();
    extract_into(response, &mut out);
    out
}

fn extract_into(value: &Value, out: &mut Vec<Record>) {
    match WireShape::classify(value) {
        WireShape::Batch(items) | WireShape::PageContainer(items) => {
            for item in items {
                extract_into(item, out);
            }
        }
        WireShape::Page(items) | WireShape::Body(items) | WireShape::Wrapped(items) => {
            out.extend(items.iter().cloned());
        }
        WireShape::Record(obj) => out.push(Value::Object(obj.clone())),
        WireShape::Unrecognized => {}
    }
}

/// JavaScript-style truthiness, which is what the webhook's flags follow.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
