// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Nexus operator console.

use thiserror::Error;

/// The primary error type used across the Nexus crates.
#[derive(Debug, Error)]
pub enum NexusError {
    /// Configuration errors (invalid URL, header values, unusable settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure (DNS, connection refused, timeout, TLS).
    #[error("webhook request failed: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The webhook answered with a non-success HTTP status.
    #[error("webhook error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// A response body claimed to be JSON but could not be decoded.
    #[error("failed to decode webhook response: {source}")]
    Decode {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A report generation request is already in flight.
    #[error("report generation already in progress")]
    ReportInProgress,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
