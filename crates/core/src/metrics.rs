//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Relay runs (outcomes, durations, per-stage durations)
//! - Transfer volume (bytes downloaded and uploaded)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Relay Metrics
// =============================================================================

/// Relay runs total by outcome.
pub static RELAYS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ferryman_relays_total", "Total relay runs"),
        &["outcome"], // "success" or a failure kind like "source_not_found"
    )
    .unwrap()
});

/// Relay duration in seconds.
pub static RELAY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ferryman_relay_duration_seconds",
            "Duration of complete relay runs",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        &["outcome"], // "success", "failed"
    )
    .unwrap()
});

/// Per-stage duration in seconds.
pub static STAGE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ferryman_stage_duration_seconds",
            "Duration of individual relay stages",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["stage"], // "download", "transcode", "upload"
    )
    .unwrap()
});

// =============================================================================
// Transfer Metrics
// =============================================================================

/// Bytes downloaded from source blobs.
pub static BYTES_DOWNLOADED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "ferryman_bytes_downloaded_total",
        "Total bytes downloaded from source blobs",
    )
    .unwrap()
});

/// Bytes uploaded to destination containers.
pub static BYTES_UPLOADED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "ferryman_bytes_uploaded_total",
        "Total bytes uploaded to destination containers",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Relay
        Box::new(RELAYS_TOTAL.clone()),
        Box::new(RELAY_DURATION.clone()),
        Box::new(STAGE_DURATION.clone()),
        // Transfer
        Box::new(BYTES_DOWNLOADED.clone()),
        Box::new(BYTES_UPLOADED.clone()),
    ]
}
