// Export pipeline Prometheus metrics
//
// Provides metrics for watermark export work, including:
// - Item counters by outcome
// - Per-stage latency histograms (decode, composite, encode)
// - Archive output volume

use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;
use std::time::Duration;

/// Global metrics registry for the export pipeline
pub struct ExportMetrics {
    /// Items processed, labelled by outcome (ok, failed)
    pub items: IntCounterVec,

    /// Stage duration histogram (in seconds)
    pub stage_duration: HistogramVec,

    /// Total bytes of finished archives
    pub archive_bytes: IntCounter,
}

/// Global singleton instance of metrics
static METRICS: OnceLock<ExportMetrics> = OnceLock::new();

impl ExportMetrics {
    /// Initialize and return the global metrics instance
    ///
    /// Subsequent calls return the same instance.
    pub fn global() -> &'static Self {
        METRICS.get_or_init(|| {
            let items = register_int_counter_vec!(
                "photomark_items_total",
                "Total number of export items by outcome",
                &["outcome"] // ok, failed
            )
            .expect("Failed to register photomark_items_total metric");

            let stage_duration = register_histogram_vec!(
                "photomark_stage_duration_seconds",
                "Duration of export pipeline stages in seconds",
                &["stage"], // decode, composite, encode
                vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0] // 1ms to 5s
            )
            .expect("Failed to register photomark_stage_duration_seconds metric");

            let archive_bytes = register_int_counter!(
                "photomark_archive_bytes_total",
                "Total size of produced archives in bytes"
            )
            .expect("Failed to register photomark_archive_bytes_total metric");

            ExportMetrics {
                items,
                stage_duration,
                archive_bytes,
            }
        })
    }

    /// Record how long a pipeline stage took
    pub fn observe_stage(&self, stage: &str, elapsed: Duration) {
        self.stage_duration
            .with_label_values(&[stage])
            .observe(elapsed.as_secs_f64());
    }

    pub fn record_item(&self, ok: bool) {
        let outcome = if ok { "ok" } else { "failed" };
        self.items.with_label_values(&[outcome]).inc();
    }

    pub fn record_archive(&self, bytes: usize) {
        self.archive_bytes.inc_by(bytes as u64);
    }

    /// Render every registered metric in the Prometheus text format
    pub fn export_prometheus(&self) -> String {
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&prometheus::gather())
            .unwrap_or_default()
    }
}
