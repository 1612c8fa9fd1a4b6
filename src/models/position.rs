use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UNKNOWN_TITLE;

/// A currently held, unresolved position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPosition {
    #[serde(default)]
    pub current_value: Option<Decimal>,
    #[serde(default)]
    pub initial_value: Option<Decimal>,
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    #[serde(default)]
    pub size: Option<Decimal>,
    #[serde(default)]
    pub cash_pnl: Option<Decimal>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl OpenPosition {
    pub fn current_value(&self) -> Decimal {
        self.current_value.unwrap_or(Decimal::ZERO)
    }

    pub fn cash_pnl(&self) -> Decimal {
        self.cash_pnl.unwrap_or(Decimal::ZERO)
    }
}

/// A resolved (or fully exited) position with a realized profit or loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPosition {
    #[serde(default)]
    pub realized_pnl: Option<Decimal>,
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ClosedPosition {
    pub fn realized_pnl(&self) -> Decimal {
        self.realized_pnl.unwrap_or(Decimal::ZERO)
    }

    pub fn avg_price(&self) -> Decimal {
        self.avg_price.unwrap_or(Decimal::ZERO)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }
}
