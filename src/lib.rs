pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod observations;
pub mod polymarket;
pub mod services;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::polymarket::DataClient;
use crate::services::WalletAnalysis;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub data_client: DataClient,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    /// Most recent analysis, replaced on every run.
    pub last_analysis: Arc<RwLock<Option<WalletAnalysis>>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        data_client: DataClient,
        metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        Self {
            config,
            data_client,
            metrics_handle,
            last_analysis: Arc::new(RwLock::new(None)),
        }
    }
}
