use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bucket::{percentage, saturating_add, WinLossBucket};
use super::category::{calculate_win_loss_by_category, Category, KeywordTable};
use super::price_range::{calculate_win_loss_by_price_range, PriceRange};
use super::ratio::Ratio;
use crate::models::ClosedPosition;

/// Realized performance over resolved positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLossStats {
    pub total_resolved: u32,
    pub wins: u32,
    pub losses: u32,
    pub breakeven: u32,
    pub win_rate: Decimal,
    #[serde(rename = "totalRealizedPnL")]
    pub total_realized_pnl: Decimal,
    pub total_win_amount: Decimal,
    pub total_loss_amount: Decimal,
    pub avg_win_amount: Decimal,
    pub avg_loss_amount: Decimal,
    pub profit_factor: Ratio,
    pub biggest_win: Option<ClosedPosition>,
    pub biggest_loss: Option<ClosedPosition>,
    pub expectancy: Decimal,
    pub by_category: BTreeMap<Category, WinLossBucket>,
    pub by_price_range: BTreeMap<PriceRange, WinLossBucket>,
    pub closed_positions: Vec<ClosedPosition>,
}

impl Default for WinLossStats {
    fn default() -> Self {
        Self {
            total_resolved: 0,
            wins: 0,
            losses: 0,
            breakeven: 0,
            win_rate: Decimal::ZERO,
            total_realized_pnl: Decimal::ZERO,
            total_win_amount: Decimal::ZERO,
            total_loss_amount: Decimal::ZERO,
            avg_win_amount: Decimal::ZERO,
            avg_loss_amount: Decimal::ZERO,
            profit_factor: Ratio::default(),
            biggest_win: None,
            biggest_loss: None,
            expectancy: Decimal::ZERO,
            by_category: BTreeMap::new(),
            by_price_range: calculate_win_loss_by_price_range(&[]),
            closed_positions: Vec::new(),
        }
    }
}

/// Compute win/loss statistics over closed positions.
///
/// Positions with `realizedPnl > 0` are wins, `< 0` losses, `== 0` breakeven.
/// Empty input short-circuits to [`WinLossStats::default`].
pub fn calculate_win_loss_stats(
    closed: &[ClosedPosition],
    categories: &KeywordTable,
) -> WinLossStats {
    if closed.is_empty() {
        return WinLossStats::default();
    }

    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut breakeven = 0u32;
    let mut total_realized_pnl = Decimal::ZERO;
    let mut total_win_amount = Decimal::ZERO;
    let mut loss_sum = Decimal::ZERO;
    let mut biggest_win: Option<&ClosedPosition> = None;
    let mut biggest_loss: Option<&ClosedPosition> = None;

    for position in closed {
        let pnl = position.realized_pnl();
        total_realized_pnl = saturating_add(total_realized_pnl, pnl);

        if pnl > Decimal::ZERO {
            wins += 1;
            total_win_amount = saturating_add(total_win_amount, pnl);
            // Strict comparison keeps the first of equal extremes.
            if biggest_win.map_or(true, |b| pnl > b.realized_pnl()) {
                biggest_win = Some(position);
            }
        } else if pnl < Decimal::ZERO {
            losses += 1;
            loss_sum = saturating_add(loss_sum, pnl);
            if biggest_loss.map_or(true, |b| pnl < b.realized_pnl()) {
                biggest_loss = Some(position);
            }
        } else {
            breakeven += 1;
        }
    }

    let total_resolved = closed.len() as u32;
    let total_loss_amount = loss_sum.abs();

    let profit_factor = if total_win_amount.is_zero() && total_loss_amount.is_zero() {
        Ratio::Finite(Decimal::ZERO)
    } else {
        Ratio::of(total_win_amount, total_loss_amount)
    };

    WinLossStats {
        total_resolved,
        wins,
        losses,
        breakeven,
        win_rate: percentage(wins as usize, closed.len()),
        total_realized_pnl,
        total_win_amount,
        total_loss_amount,
        avg_win_amount: mean(total_win_amount, wins),
        avg_loss_amount: mean(total_loss_amount, losses),
        profit_factor,
        biggest_win: biggest_win.cloned(),
        biggest_loss: biggest_loss.cloned(),
        expectancy: mean(total_realized_pnl, total_resolved),
        by_category: calculate_win_loss_by_category(closed, categories),
        by_price_range: calculate_win_loss_by_price_range(closed),
        closed_positions: closed.to_vec(),
    }
}

fn mean(total: Decimal, n: u32) -> Decimal {
    if n == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(n)
    }
}
