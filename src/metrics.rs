use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("wallet_analyses_total").absolute(0);
    counter!("wallet_fetch_failures_total").absolute(0);

    // Histograms are lazily created on first record; force creation.
    histogram!("analysis_trades").record(0.0);
    histogram!("analysis_latency_seconds").record(0.0);

    Ok(handle)
}

/// Recorder-less handle for tests, where only one global recorder may exist.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
