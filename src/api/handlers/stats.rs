use axum::extract::{Path, State};
use axum::Json;
use metrics::counter;

use super::ApiResponse;
use crate::errors::AppError;
use crate::polymarket::{is_valid_address, WalletData};
use crate::services::{analyze, WalletAnalysis};
use crate::AppState;

/// Analyze caller-supplied records (`activity`, `positions`, `closedPositions`).
pub async fn analyze_upload(
    State(state): State<AppState>,
    Json(data): Json<WalletData>,
) -> Json<ApiResponse<WalletAnalysis>> {
    let analysis = analyze(None, &data);
    store(&state, &analysis).await;
    Json(ApiResponse::ok(analysis))
}

/// Fetch a wallet from the Data API and analyze it.
pub async fn analyze_wallet(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<WalletAnalysis>>, AppError> {
    let address = address.to_lowercase();
    if !is_valid_address(&address) {
        return Err(AppError::BadRequest(format!("invalid wallet address: {address}")));
    }

    let data = state.data_client.fetch_wallet(&address).await.map_err(|e| {
        counter!("wallet_fetch_failures_total").increment(1);
        tracing::warn!(error = %e, wallet = %address, "Failed to fetch wallet data");
        e
    })?;

    let analysis = analyze(Some(address), &data);
    store(&state, &analysis).await;
    Ok(Json(ApiResponse::ok(analysis)))
}

/// Most recent analysis.
pub async fn latest(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WalletAnalysis>>, AppError> {
    let guard = state.last_analysis.read().await;
    match guard.as_ref() {
        Some(analysis) => Ok(Json(ApiResponse::ok(analysis.clone()))),
        None => Err(AppError::NotFound("no analysis has been run yet".into())),
    }
}

async fn store(state: &AppState, analysis: &WalletAnalysis) {
    *state.last_analysis.write().await = Some(analysis.clone());
}
