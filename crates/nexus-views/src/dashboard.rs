// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard: headline KPIs, the weekly revenue chart and the channel mix.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use nexus_core::{
    Action, ChartPoint, DataSource, Kpi, NexusError, PlatformShare, WebhookTransport,
};
use nexus_mapping::kpi::CHART_DAYS;
use nexus_mapping::{aggregate_kpi, map_orders, platform_shares, revenue_chart};
use nexus_webhook::WebhookResponse;
use serde::Serialize;
use serde_json::Map;
use tokio::sync::Mutex;
use tracing::info;

use crate::{ViewOptions, command, fetch_records, sample};

/// Everything the dashboard shows at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub kpi: Kpi,
    pub chart: Vec<ChartPoint>,
    pub platforms: Vec<PlatformShare>,
    pub source: DataSource,
}

impl DashboardSnapshot {
    fn sample() -> Self {
        Self {
            kpi: sample::kpi(),
            chart: sample::revenue_chart(),
            platforms: sample::platform_shares(),
            source: DataSource::Sample,
        }
    }
}

/// Controller for the dashboard screen.
pub struct DashboardView {
    transport: Arc<dyn WebhookTransport>,
    options: ViewOptions,
    snapshot: Mutex<DashboardSnapshot>,
    generating_report: AtomicBool,
}

impl DashboardView {
    /// Starts out showing sample data until the first [`refresh`](Self::refresh).
    pub fn new(transport: Arc<dyn WebhookTransport>, options: ViewOptions) -> Self {
        Self {
            transport,
            options,
            snapshot: Mutex::new(DashboardSnapshot::sample()),
            generating_report: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Fetch recent orders and recompute every dashboard figure from them.
    pub async fn refresh(&self) -> DashboardSnapshot {
        let records = fetch_records(self.transport.as_ref(), Action::GetDashboardData).await;

        let next = if records.is_empty() && self.options.fallback_to_samples {
            DashboardSnapshot::sample()
        } else {
            let orders = map_orders(&records);
            let mut platforms = platform_shares(&orders);
            if platforms.is_empty() && self.options.fallback_to_samples {
                platforms = sample::platform_shares();
            }
            DashboardSnapshot {
                kpi: aggregate_kpi(&records),
                chart: revenue_chart(&records, Utc::now().date_naive(), CHART_DAYS),
                platforms,
                source: DataSource::Live,
            }
        };

        info!(
            source = %next.source,
            orders = next.kpi.orders,
            pending = next.kpi.pending_shipments,
            "dashboard refreshed"
        );
        *self.snapshot.lock().await = next.clone();
        next
    }

    /// Whether a report request is currently in flight.
    pub fn is_generating_report(&self) -> bool {
        self.generating_report.load(Ordering::Acquire)
    }

    /// Ask the endpoint to generate a report.
    ///
    /// Only one request may be in flight; a second call while the first is
    /// pending returns [`NexusError::ReportInProgress`] without contacting the
    /// endpoint.
    pub async fn generate_report(&self) -> Result<WebhookResponse, NexusError> {
        if self
            .generating_report
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(NexusError::ReportInProgress);
        }
        let _guard = ReportGuard(&self.generating_report);

        let reply = command(self.transport.as_ref(), Action::GenerateReport, Map::new()).await;
        info!(success = reply.success, "report generation requested");
        Ok(reply)
    }
}

/// Clears the in-progress flag even if the request future is dropped.
struct ReportGuard<'a>(&'a AtomicBool);

impl Drop for ReportGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use nexus_test_utils::MockTransport;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_shows_sample_dashboard() {
        let view = DashboardView::new(Arc::new(MockTransport::unreachable()), ViewOptions::default());
        let snapshot = view.refresh().await;
        assert_eq!(snapshot.source, DataSource::Sample);
        assert_eq!(snapshot.kpi, sample::kpi());
        assert_eq!(snapshot.chart.len(), 7);
    }

    #[tokio::test]
    async fn live_orders_drive_the_kpis() {
        let mock = MockTransport::new();
        let today = Utc::now().to_rfc3339();
        mock.push_reply(
            Action::GetDashboardData,
            json!([{"body": {"data": [
                {"_id": "a", "status": "new", "total": {"totalPrice": 100}, "createdAt": today, "source": "facebook"},
                {"_id": "b", "status": "delivered", "total": 50, "createdAt": today},
            ]}}]),
        )
        .await;

        let view = DashboardView::new(Arc::new(mock), ViewOptions::default());
        let snapshot = view.refresh().await;

        assert_eq!(snapshot.source, DataSource::Live);
        assert_eq!(snapshot.kpi.orders, 2);
        assert!((snapshot.kpi.revenue - 150.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.kpi.pending_shipments, 1);
        assert_eq!(snapshot.kpi.revenue_growth, None);
        let last = snapshot.chart.last().unwrap();
        assert_eq!(last.orders, 2);
        let facebook = snapshot
            .platforms
            .iter()
            .find(|s| s.platform == nexus_core::Platform::Facebook)
            .unwrap();
        assert!((facebook.percent - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn no_fallback_keeps_empty_live_figures() {
        let view = DashboardView::new(
            Arc::new(MockTransport::unreachable()),
            ViewOptions {
                fallback_to_samples: false,
            },
        );
        let snapshot = view.refresh().await;
        assert_eq!(snapshot.source, DataSource::Live);
        assert_eq!(snapshot.kpi.orders, 0);
        assert!(snapshot.platforms.is_empty());
    }

    #[tokio::test]
    async fn overlapping_report_requests_are_refused() {
        let mock = Arc::new(MockTransport::with_fallback(json!({"success": true})));
        let gate = mock.gate(Action::GenerateReport).await;
        let view = Arc::new(DashboardView::new(mock.clone(), ViewOptions::default()));

        let first = tokio::spawn({
            let view = Arc::clone(&view);
            async move { view.generate_report().await }
        });
        while mock.calls_for(Action::GenerateReport).await.is_empty() {
            tokio::task::yield_now().await;
        }
        assert!(view.is_generating_report());
        assert!(matches!(
            view.generate_report().await,
            Err(NexusError::ReportInProgress)
        ));

        gate.notify_one();
        let reply = first.await.unwrap().unwrap();
        assert!(reply.success);
        assert!(!view.is_generating_report());
        assert_eq!(mock.calls_for(Action::GenerateReport).await.len(), 1);
    }
}
