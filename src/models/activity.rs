use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{deserialize_side, null_as_default, Side, UNKNOWN_TITLE};

/// Activity type the Data API uses for executed trades.
pub const TRADE_ACTIVITY: &str = "TRADE";

/// One executed trade from a wallet's activity feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Seconds since epoch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "deserialize_side")]
    pub side: Option<Side>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub size: Option<Decimal>,
    #[serde(default)]
    pub usdc_size: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Activity type (`TRADE`, `REDEEM`, `SPLIT`, ...). Absent on feeds that
    /// only carry trades.
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
}

impl TradeRecord {
    pub fn is_trade(&self) -> bool {
        self.activity_type
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case(TRADE_ACTIVITY))
    }

    pub fn price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    pub fn usdc_size(&self) -> Decimal {
        self.usdc_size.unwrap_or(Decimal::ZERO)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    /// UTC timestamp, `None` when outside chrono's representable range.
    pub fn traded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}
