use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bucket::{saturating_add, saturating_sum};
use super::category::{
    categorize_markets, Category, KeywordTable, MARKET_CATEGORY_KEYWORDS,
    POSITION_CATEGORY_KEYWORDS,
};
use super::ratio::{round_half_up, Ratio};
use super::win_loss::{calculate_win_loss_stats, WinLossStats};
use crate::models::{ClosedPosition, OpenPosition, Side, TradeRecord};

/// Trade counts per UTC weekday, serialized Sunday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDistribution {
    #[serde(rename = "Sunday")]
    pub sunday: u32,
    #[serde(rename = "Monday")]
    pub monday: u32,
    #[serde(rename = "Tuesday")]
    pub tuesday: u32,
    #[serde(rename = "Wednesday")]
    pub wednesday: u32,
    #[serde(rename = "Thursday")]
    pub thursday: u32,
    #[serde(rename = "Friday")]
    pub friday: u32,
    #[serde(rename = "Saturday")]
    pub saturday: u32,
}

impl DayDistribution {
    pub fn get(&self, day: Weekday) -> u32 {
        match day {
            Weekday::Sun => self.sunday,
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
        }
    }

    fn increment(&mut self, day: Weekday) {
        let slot = match day {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        };
        *slot += 1;
    }
}

/// Volume for one `YYYY-MM` month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub volume: Decimal,
    pub trades: u32,
    pub buys: u32,
    pub sells: u32,
}

/// Keyword tables used for the two category passes.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationTables {
    pub markets: KeywordTable,
    pub positions: KeywordTable,
}

impl Default for ClassificationTables {
    fn default() -> Self {
        Self {
            markets: MARKET_CATEGORY_KEYWORDS,
            positions: POSITION_CATEGORY_KEYWORDS,
        }
    }
}

/// Full statistics report for one wallet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_trades: u32,
    pub total_volume: Decimal,
    pub unique_markets: u32,
    pub avg_trade_size: Decimal,
    pub buys: u32,
    pub sells: u32,
    pub buy_sell_ratio: Ratio,

    pub trading_days: u32,
    pub first_trade: Option<DateTime<Utc>>,
    pub last_trade: Option<DateTime<Utc>>,
    pub trades_per_day: Decimal,
    pub hour_distribution: [u32; 24],
    pub day_distribution: DayDistribution,
    pub monthly_volume: BTreeMap<String, MonthlyVolume>,

    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
    pub avg_buy_price: Decimal,
    pub avg_sell_price: Decimal,

    /// Unique markets per category.
    pub categories: BTreeMap<Category, u32>,

    pub open_positions: u32,
    pub total_position_value: Decimal,
    #[serde(rename = "totalUnrealizedPnL")]
    pub total_unrealized_pnl: Decimal,

    #[serde(flatten)]
    pub win_loss: WinLossStats,
}

/// Compute the statistics report with the default keyword tables.
pub fn compute_stats(
    activity: &[TradeRecord],
    positions: &[OpenPosition],
    closed: &[ClosedPosition],
) -> Stats {
    compute_stats_with(activity, positions, closed, &ClassificationTables::default())
}

/// Compute the statistics report.
///
/// Pure and infallible: missing numeric fields read as zero, empty inputs
/// produce a zeroed report. `positions` is expected to be dust-filtered.
pub fn compute_stats_with(
    activity: &[TradeRecord],
    positions: &[OpenPosition],
    closed: &[ClosedPosition],
    tables: &ClassificationTables,
) -> Stats {
    let trades: Vec<&TradeRecord> = activity.iter().filter(|t| t.is_trade()).collect();

    let total_trades = trades.len() as u32;
    let total_volume = saturating_sum(trades.iter().map(|t| t.usdc_size()));
    let unique_markets = trades
        .iter()
        .map(|t| t.condition_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u32;
    let avg_trade_size = if total_trades > 0 {
        total_volume / Decimal::from(total_trades)
    } else {
        Decimal::ZERO
    };

    let mut buys = 0u32;
    let mut sells = 0u32;
    let mut buy_volume = Decimal::ZERO;
    let mut sell_volume = Decimal::ZERO;
    let mut buy_price_sum = Decimal::ZERO;
    let mut sell_price_sum = Decimal::ZERO;

    let mut days: HashSet<NaiveDate> = HashSet::new();
    let mut first_trade: Option<DateTime<Utc>> = None;
    let mut last_trade: Option<DateTime<Utc>> = None;
    let mut hour_distribution = [0u32; 24];
    let mut day_distribution = DayDistribution::default();
    let mut monthly_volume: BTreeMap<String, MonthlyVolume> = BTreeMap::new();

    for trade in &trades {
        match trade.side {
            Some(Side::Buy) => {
                buys += 1;
                buy_volume = saturating_add(buy_volume, trade.usdc_size());
                buy_price_sum = saturating_add(buy_price_sum, trade.price());
            }
            Some(Side::Sell) => {
                sells += 1;
                sell_volume = saturating_add(sell_volume, trade.usdc_size());
                sell_price_sum = saturating_add(sell_price_sum, trade.price());
            }
            None => {}
        }

        let Some(at) = trade.traded_at() else {
            continue;
        };

        days.insert(at.date_naive());
        first_trade = Some(first_trade.map_or(at, |f| f.min(at)));
        last_trade = Some(last_trade.map_or(at, |l| l.max(at)));
        hour_distribution[at.hour() as usize] += 1;
        day_distribution.increment(at.weekday());

        let month = monthly_volume
            .entry(format!("{:04}-{:02}", at.year(), at.month()))
            .or_default();
        month.volume = saturating_add(month.volume, trade.usdc_size());
        month.trades += 1;
        match trade.side {
            Some(Side::Buy) => month.buys += 1,
            Some(Side::Sell) => month.sells += 1,
            None => {}
        }
    }

    let trading_days = days.len() as u32;
    let trades_per_day = if trading_days > 0 {
        round_half_up(Decimal::from(total_trades) / Decimal::from(trading_days), 1)
    } else {
        Decimal::ZERO
    };

    let total_position_value = saturating_sum(positions.iter().map(|p| p.current_value()));
    let total_unrealized_pnl = saturating_sum(positions.iter().map(|p| p.cash_pnl()));

    let stats = Stats {
        total_trades,
        total_volume,
        unique_markets,
        avg_trade_size,
        buys,
        sells,
        buy_sell_ratio: Ratio::rounded(Decimal::from(buys), Decimal::from(sells), 2),
        trading_days,
        first_trade,
        last_trade,
        trades_per_day,
        hour_distribution,
        day_distribution,
        monthly_volume,
        buy_volume,
        sell_volume,
        avg_buy_price: average(buy_price_sum, buys),
        avg_sell_price: average(sell_price_sum, sells),
        categories: categorize_markets(&trades, &tables.markets),
        open_positions: positions.len() as u32,
        total_position_value,
        total_unrealized_pnl,
        win_loss: calculate_win_loss_stats(closed, &tables.positions),
    };

    tracing::debug!(
        trades = stats.total_trades,
        markets = stats.unique_markets,
        resolved = stats.win_loss.total_resolved,
        volume = %stats.total_volume,
        realized_pnl = %stats.win_loss.total_realized_pnl,
        "Computed wallet stats"
    );

    stats
}

fn average(sum: Decimal, n: u32) -> Decimal {
    if n == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(n)
    }
}
