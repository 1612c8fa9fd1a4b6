use rust_decimal::Decimal;

use polystats::config::AppConfig;
use polystats::models::{ClosedPosition, Side, TradeRecord};
use polystats::polymarket::DataClient;
use polystats::AppState;

/// 2024-03-15T14:30:00Z
#[allow(dead_code)]
pub const BASE_TS: i64 = 1_710_513_000;

/// App state wired to an unreachable Data API and a detached metrics handle.
#[allow(dead_code)]
pub fn test_state(api_token: Option<&str>) -> AppState {
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        data_api_url: "http://127.0.0.1:9".into(),
        api_token: api_token.map(str::to_string),
        ..AppConfig::default()
    };
    let data_client =
        DataClient::new(reqwest::Client::new()).with_base_url(config.data_api_url.clone());

    AppState::new(config, data_client, polystats::metrics::detached_handle())
}

#[allow(dead_code)]
pub fn trade(ts: i64, side: Side, cents: i64, usdc: i64, market: &str, title: &str) -> TradeRecord {
    TradeRecord {
        timestamp: ts,
        side: Some(side),
        price: Some(Decimal::new(cents, 2)),
        size: Some(Decimal::from(usdc)),
        usdc_size: Some(Decimal::from(usdc)),
        condition_id: market.to_string(),
        title: Some(title.to_string()),
        activity_type: Some("TRADE".into()),
    }
}

#[allow(dead_code)]
pub fn closed(pnl: i64, cents: i64, title: &str) -> ClosedPosition {
    ClosedPosition {
        realized_pnl: Some(Decimal::from(pnl)),
        avg_price: Some(Decimal::new(cents, 2)),
        title: Some(title.to_string()),
    }
}
