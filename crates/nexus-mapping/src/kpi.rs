// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard aggregates computed from raw order records.

use chrono::{Days, NaiveDate};
use nexus_core::{ChartPoint, Kpi, Order, Platform, PlatformShare};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::fields;
use crate::order::{CREATED_AT, order_total};
use crate::status::is_pending_like;

/// Days covered by the revenue chart, ending today.
pub const CHART_DAYS: u64 = 7;

/// Headline KPIs over `records`.
///
/// Growth and AI-handled rate stay `None`: the webhook keeps no earlier
/// period to compare against.
pub fn aggregate_kpi(records: &[Value]) -> Kpi {
    let revenue: f64 = records.iter().map(order_total).sum();
    let pending_shipments = records
        .iter()
        .filter(|r| r.get("status").and_then(Value::as_str).is_some_and(is_pending_like))
        .count() as u64;

    Kpi {
        revenue,
        revenue_growth: None,
        orders: records.len() as u64,
        orders_growth: None,
        ai_handled_rate: None,
        pending_shipments,
    }
}

/// Revenue and order count per day for the `days` days ending on `today`.
///
/// Records without a parseable creation time, or outside the window, are
/// left out.
pub fn revenue_chart(records: &[Value], today: NaiveDate, days: u64) -> Vec<ChartPoint> {
    let window: Vec<NaiveDate> = (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect();

    let mut points: Vec<ChartPoint> = window
        .iter()
        .map(|day| ChartPoint {
            label: day.format("%a").to_string(),
            revenue: 0.0,
            orders: 0,
        })
        .collect();

    for record in records {
        let Some(created) = fields::timestamp(record, CREATED_AT) else {
            continue;
        };
        if let Some(slot) = window.iter().position(|day| *day == created.date_naive()) {
            points[slot].revenue += order_total(record);
            points[slot].orders += 1;
        }
    }

    points
}

/// Percentage of `orders` per platform, one decimal place.
///
/// Empty input gives an empty breakdown.
pub fn platform_shares(orders: &[Order]) -> Vec<PlatformShare> {
    if orders.is_empty() {
        return Vec::new();
    }
    let total = orders.len() as f64;
    Platform::iter()
        .map(|platform| {
            let n = orders
                .iter()
                .filter(|o| o.customer.platform_type == platform)
                .count() as f64;
            PlatformShare {
                platform,
                percent: (n / total * 1000.0).round() / 10.0,
            }
        })
        .collect()
}
