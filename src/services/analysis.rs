use std::time::Instant;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;

use crate::analytics::{compute_stats, Stats};
use crate::observations::{generate_observations, Observation};
use crate::polymarket::WalletData;

/// One completed analysis: the report plus its observations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    pub wallet: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    pub stats: Stats,
    pub observations: Vec<Observation>,
}

/// Run the statistics pipeline over fetched (or uploaded) wallet data.
pub fn analyze(wallet: Option<String>, data: &WalletData) -> WalletAnalysis {
    let start = Instant::now();

    let stats = compute_stats(&data.activity, &data.positions, &data.closed_positions);
    let observations = generate_observations(&stats);

    counter!("wallet_analyses_total").increment(1);
    histogram!("analysis_trades").record(stats.total_trades as f64);
    histogram!("analysis_latency_seconds").record(start.elapsed().as_secs_f64());

    tracing::info!(
        wallet = wallet.as_deref().unwrap_or("uploaded"),
        trades = stats.total_trades,
        resolved = stats.win_loss.total_resolved,
        observations = observations.len(),
        "Wallet analysis complete"
    );

    WalletAnalysis {
        wallet,
        analyzed_at: Utc::now(),
        stats,
        observations,
    }
}
