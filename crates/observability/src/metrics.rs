//! Prometheus metrics infrastructure
//!
//! This module provides utilities for initializing the Prometheus exporter
//! and a metric set for the aggregation/sync pipeline.

use metrics::{counter, histogram, Counter, Histogram};
use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize the Prometheus metrics exporter
///
/// Starts an HTTP listener on the specified port that exposes metrics at
/// the `/metrics` endpoint.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}

/// Pipeline metrics
///
/// One instance per process role ("aggregate" producer or "sync" consumer).
///
/// # Metrics
///
/// * `pipeline_runs_total` - runs, labeled by role and result
/// * `pipeline_run_duration_seconds` - run duration histogram per role
#[derive(Clone)]
pub struct PipelineMetrics {
    succeeded: Counter,
    failed: Counter,
    duration: Histogram,
}

impl PipelineMetrics {
    pub fn new(role: &str) -> Self {
        let role = role.to_string();
        Self {
            succeeded: counter!("pipeline_runs_total", "role" => role.clone(), "result" => "ok"),
            failed: counter!("pipeline_runs_total", "role" => role.clone(), "result" => "error"),
            duration: histogram!("pipeline_run_duration_seconds", "role" => role),
        }
    }

    /// Record a completed run
    pub fn record_run(&self, duration: Duration, succeeded: bool) {
        if succeeded {
            self.succeeded.increment(1);
        } else {
            self.failed.increment(1);
        }
        self.duration.record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_metrics_record() {
        // Just verify recording does not panic without an installed recorder.
        let metrics = PipelineMetrics::new("aggregate");
        metrics.record_run(Duration::from_millis(120), true);
        metrics.record_run(Duration::from_millis(80), false);
    }
}
