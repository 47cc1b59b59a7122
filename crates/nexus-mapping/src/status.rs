// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enum classification for inconsistently cased, sometimes compound, status
//! and platform strings.

use nexus_core::{OrderStatus, Platform};

/// Substring to status, checked in order; the first hit wins.
const STATUS_PRIORITY: &[(&str, OrderStatus)] = &[
    ("deliver", OrderStatus::Delivered),
    ("cancel", OrderStatus::Cancelled),
    ("reject", OrderStatus::Rejected),
    ("attempt", OrderStatus::Attempt),
    ("confirm", OrderStatus::Confirmed),
    ("upload", OrderStatus::Uploaded),
    ("pend", OrderStatus::Pending),
];

/// Unrecognised statuses are treated as freshly uploaded orders.
pub const DEFAULT_STATUS: OrderStatus = OrderStatus::Uploaded;

const PLATFORM_PRIORITY: &[(&str, Platform)] = &[
    ("facebook", Platform::Facebook),
    ("instagram", Platform::Instagram),
];

pub const DEFAULT_PLATFORM: Platform = Platform::Converty;

/// Raw statuses counted as "waiting to ship" on the dashboard.
const PENDING_LIKE: &[&str] = &[
    "pending",
    "new",
    "confirmed",
    "processing",
    "ready_to_ship",
    "uploaded",
];

/// Classify a raw order status by case-insensitive substring match.
pub fn map_status(raw: &str) -> OrderStatus {
    let lowered = raw.to_lowercase();
    STATUS_PRIORITY
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map_or(DEFAULT_STATUS, |(_, status)| *status)
}

/// Classify a raw source/platform string.
pub fn map_platform(raw: &str) -> Platform {
    let lowered = raw.to_lowercase();
    PLATFORM_PRIORITY
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map_or(DEFAULT_PLATFORM, |(_, platform)| *platform)
}

/// Whether a raw status counts towards pending shipments.
///
/// This is an exact match on the lower-cased status, unlike [`map_status`]:
/// `ready_to_ship` is pending here while it maps to `uploaded` as a status.
pub fn is_pending_like(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    PENDING_LIKE.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn priority_order() {
        assert_eq!(map_status("Delivered"), OrderStatus::Delivered);
        assert_eq!(map_status("LIVRAISON_delivered_cancel"), OrderStatus::Delivered);
        assert_eq!(map_status("cancelled_pending"), OrderStatus::Cancelled);
        assert_eq!(map_status("Rejected by client"), OrderStatus::Rejected);
        assert_eq!(map_status("attempt_2"), OrderStatus::Attempt);
        assert_eq!(map_status("Confirmed"), OrderStatus::Confirmed);
        assert_eq!(map_status("uploaded"), OrderStatus::Uploaded);
        assert_eq!(map_status("Pending"), OrderStatus::Pending);
    }

    #[test]
    fn unmatched_defaults_to_uploaded() {
        assert_eq!(map_status("Ready_To_Ship"), OrderStatus::Uploaded);
        assert_eq!(map_status(""), OrderStatus::Uploaded);
        assert_eq!(map_status("processing"), OrderStatus::Uploaded);
    }

    #[test]
    fn canonical_statuses_are_fixed_points() {
        for status in OrderStatus::iter() {
            assert_eq!(map_status(&status.to_string()), status);
        }
    }

    #[test]
    fn platforms() {
        assert_eq!(map_platform("Facebook Messenger"), Platform::Facebook);
        assert_eq!(map_platform("INSTAGRAM_DM"), Platform::Instagram);
        assert_eq!(map_platform("converty"), Platform::Converty);
        assert_eq!(map_platform(""), Platform::Converty);
        for platform in Platform::iter() {
            assert_eq!(map_platform(&platform.to_string()), platform);
        }
    }

    #[test]
    fn pending_like_is_exact() {
        assert!(is_pending_like("Ready_To_Ship"));
        assert!(is_pending_like("NEW"));
        assert!(!is_pending_like("pending_payment"));
        assert!(!is_pending_like("delivered"));
    }

    proptest! {
        #[test]
        fn map_status_is_total_and_idempotent(raw in ".*") {
            let once = map_status(&raw);
            prop_assert_eq!(map_status(&once.to_string()), once);
        }

        #[test]
        fn map_platform_is_total(raw in ".*") {
            let once = map_platform(&raw);
            prop_assert_eq!(map_platform(&once.to_string()), once);
        }
    }
}
