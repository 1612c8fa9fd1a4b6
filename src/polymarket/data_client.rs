use std::time::Duration;

use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::WalletData;
use crate::config::AppConfig;
use crate::models::{ClosedPosition, OpenPosition, TradeRecord};

pub const DATA_API_BASE: &str = "https://data-api.polymarket.com";

#[derive(Debug, Error)]
pub enum DataClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Paging and filtering knobs for wallet fetches.
#[derive(Debug, Clone)]
pub struct FetchLimits {
    pub activity_page_size: u32,
    pub activity_max_pages: u32,
    pub closed_page_size: u32,
    pub closed_max_pages: u32,
    /// Open positions with a current value below this are dropped.
    pub dust_threshold: Decimal,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            activity_page_size: 500,
            activity_max_pages: 10,
            closed_page_size: 500,
            closed_max_pages: 10,
            dust_threshold: Decimal::ONE,
        }
    }
}

/// Read-only client for the Polymarket Data API.
#[derive(Debug, Clone)]
pub struct DataClient {
    http: Client,
    base_url: String,
    limits: FetchLimits,
}

impl DataClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: DATA_API_BASE.into(),
            limits: FetchLimits::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DataClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.data_api_url.trim_end_matches('/').to_string(),
            limits: config.fetch_limits(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch a wallet's trade activity, newest first, across pages.
    pub async fn get_activity(&self, user: &str) -> Result<Vec<TradeRecord>, DataClientError> {
        self.get_paged(
            "activity",
            &[("user", user), ("type", "TRADE")],
            self.limits.activity_page_size,
            self.limits.activity_max_pages,
        )
        .await
    }

    /// Fetch open positions, dropping dust below the configured threshold.
    pub async fn get_positions(&self, user: &str) -> Result<Vec<OpenPosition>, DataClientError> {
        let url = self.endpoint("positions", &[("user", user), ("sizeThreshold", "0")])?;
        let resp = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        let positions: Vec<OpenPosition> = resp.json().await?;
        let fetched = positions.len();
        let kept = drop_dust(positions, self.limits.dust_threshold);

        tracing::debug!(user, fetched, kept = kept.len(), "Fetched open positions");
        Ok(kept)
    }

    /// Fetch resolved positions across pages.
    pub async fn get_closed_positions(
        &self,
        user: &str,
    ) -> Result<Vec<ClosedPosition>, DataClientError> {
        self.get_paged(
            "closed-positions",
            &[("user", user)],
            self.limits.closed_page_size,
            self.limits.closed_max_pages,
        )
        .await
    }

    /// Fetch everything the aggregator needs for one wallet.
    pub async fn fetch_wallet(&self, user: &str) -> Result<WalletData, DataClientError> {
        let (activity, positions, closed_positions) = tokio::try_join!(
            self.get_activity(user),
            self.get_positions(user),
            self.get_closed_positions(user),
        )?;

        tracing::info!(
            user,
            activity = activity.len(),
            positions = positions.len(),
            closed = closed_positions.len(),
            "Fetched wallet data"
        );

        Ok(WalletData {
            activity,
            positions,
            closed_positions,
        })
    }

    /// Walk `limit`/`offset` pages until a short page or `max_pages`.
    async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        page_size: u32,
        max_pages: u32,
    ) -> Result<Vec<T>, DataClientError> {
        if page_size == 0 {
            return Err(DataClientError::Unexpected("page size must be positive".into()));
        }

        let limit = page_size.to_string();
        let mut out: Vec<T> = Vec::new();

        for page in 0..max_pages {
            let offset = (page * page_size).to_string();
            let mut query = params.to_vec();
            query.push(("limit", limit.as_str()));
            query.push(("offset", offset.as_str()));

            let url = self.endpoint(path, &query)?;
            let resp = self
                .http
                .get(url)
                .send()
                .await?
                .error_for_status()?;

            let batch: Vec<T> = resp.json().await?;
            let len = batch.len();
            out.extend(batch);

            if len < page_size as usize {
                break;
            }
            if page + 1 == max_pages {
                tracing::warn!(path, pages = max_pages, "Page limit reached, results truncated");
            }
        }

        Ok(out)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, DataClientError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&raw, params)
            .map_err(|e| DataClientError::Unexpected(format!("invalid URL {raw}: {e}")))
    }
}

/// Keep only positions whose current value meets `threshold`.
pub fn drop_dust(positions: Vec<OpenPosition>, threshold: Decimal) -> Vec<OpenPosition> {
    positions
        .into_iter()
        .filter(|p| p.current_value() >= threshold)
        .collect()
}
