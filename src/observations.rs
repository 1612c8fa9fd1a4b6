use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::ratio::round_half_up;
use crate::analytics::{Category, PriceRange, Ratio, Stats};

/// Minimum resolved positions before win rate is worth commenting on.
const MIN_RESOLVED_FOR_WIN_RATE: u32 = 10;
/// Minimum unique markets before category concentration is reported.
const MIN_MARKETS_FOR_CONCENTRATION: u32 = 5;
/// Minimum trades for timing/side observations.
const MIN_TRADES_FOR_HABITS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    StrongWinRate,
    WeakWinRate,
    LossesOutweighWins,
    NoLosingPositions,
    LongshotBias,
    FavoriteBias,
    CategoryConcentration,
    HighFrequency,
    NightTrading,
    HoldsToResolution,
    UnderwaterBook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Warning,
}

/// A rule-based note about a wallet's trading behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub kind: ObservationKind,
    pub tone: Tone,
    pub title: String,
    pub detail: String,
}

impl Observation {
    fn new(kind: ObservationKind, tone: Tone, title: &str, detail: String) -> Self {
        Self {
            kind,
            tone,
            title: title.to_string(),
            detail,
        }
    }
}

/// Derive behavioral observations from a statistics report.
///
/// Rules fire independently and are returned in a fixed order.
pub fn generate_observations(stats: &Stats) -> Vec<Observation> {
    let mut out = Vec::new();
    let wl = &stats.win_loss;

    // Win rate
    if wl.total_resolved >= MIN_RESOLVED_FOR_WIN_RATE {
        if wl.win_rate >= Decimal::from(60) {
            out.push(Observation::new(
                ObservationKind::StrongWinRate,
                Tone::Positive,
                "Strong win rate",
                format!(
                    "{}% of {} resolved positions were profitable.",
                    round_half_up(wl.win_rate, 1),
                    wl.total_resolved
                ),
            ));
        } else if wl.win_rate <= Decimal::from(40) {
            out.push(Observation::new(
                ObservationKind::WeakWinRate,
                Tone::Warning,
                "Low win rate",
                format!(
                    "Only {}% of {} resolved positions were profitable.",
                    round_half_up(wl.win_rate, 1),
                    wl.total_resolved
                ),
            ));
        }
    }

    // Payoff asymmetry
    match wl.profit_factor {
        Ratio::Finite(pf) if wl.total_loss_amount > Decimal::ZERO && pf < Decimal::ONE => {
            out.push(Observation::new(
                ObservationKind::LossesOutweighWins,
                Tone::Warning,
                "Losses outweigh wins",
                format!(
                    "Profit factor is {}: ${} won against ${} lost.",
                    round_half_up(pf, 2),
                    round_half_up(wl.total_win_amount, 2),
                    round_half_up(wl.total_loss_amount, 2)
                ),
            ));
        }
        Ratio::Infinite => {
            out.push(Observation::new(
                ObservationKind::NoLosingPositions,
                Tone::Positive,
                "No losing positions",
                format!("All {} profitable resolutions with no realized losses.", wl.wins),
            ));
        }
        _ => {}
    }

    // Entry price bias
    if wl.total_resolved > 0 {
        let share = |range: PriceRange| {
            wl.by_price_range
                .get(&range)
                .map(|b| (b.count, b.total_pnl))
                .unwrap_or((0, Decimal::ZERO))
        };
        let threshold = Decimal::new(40, 2);
        let resolved = Decimal::from(wl.total_resolved);

        let (longshots, longshot_pnl) = share(PriceRange::UpTo20);
        if Decimal::from(longshots) / resolved >= threshold {
            let tone = if longshot_pnl < Decimal::ZERO { Tone::Warning } else { Tone::Neutral };
            out.push(Observation::new(
                ObservationKind::LongshotBias,
                tone,
                "Longshot hunter",
                format!(
                    "{longshots} of {} resolved positions were entered at 20¢ or less (net ${}).",
                    wl.total_resolved,
                    round_half_up(longshot_pnl, 2)
                ),
            ));
        }

        let (favorites, _) = share(PriceRange::UpTo100);
        if Decimal::from(favorites) / resolved >= threshold {
            out.push(Observation::new(
                ObservationKind::FavoriteBias,
                Tone::Neutral,
                "Favorite backer",
                format!(
                    "{favorites} of {} resolved positions were entered above 80¢.",
                    wl.total_resolved
                ),
            ));
        }
    }

    // Category concentration; unclassified markets never count as a specialty.
    if stats.unique_markets >= MIN_MARKETS_FOR_CONCENTRATION {
        let top = stats
            .categories
            .iter()
            .filter(|(c, _)| **c != Category::Other)
            .max_by_key(|(_, n)| **n);
        if let Some((category, count)) = top {
            if u64::from(*count) * 2 >= u64::from(stats.unique_markets) {
                out.push(Observation::new(
                    ObservationKind::CategoryConcentration,
                    Tone::Neutral,
                    "Category specialist",
                    format!("{count} of {} markets traded are {category}.", stats.unique_markets),
                ));
            }
        }
    }

    // Frequency
    if stats.trades_per_day >= Decimal::from(20) {
        out.push(Observation::new(
            ObservationKind::HighFrequency,
            Tone::Neutral,
            "High-frequency trading",
            format!("Averages {} trades per active day.", stats.trades_per_day),
        ));
    }

    // Timing
    if stats.total_trades >= MIN_TRADES_FOR_HABITS {
        let night: u32 = stats.hour_distribution[..6].iter().sum();
        if Decimal::from(night) / Decimal::from(stats.total_trades) >= Decimal::new(30, 2) {
            out.push(Observation::new(
                ObservationKind::NightTrading,
                Tone::Neutral,
                "Night owl",
                format!(
                    "{night} of {} trades were placed between 00:00 and 06:00 UTC.",
                    stats.total_trades
                ),
            ));
        }
    }

    // Side
    if stats.sells == 0 && stats.buys >= MIN_TRADES_FOR_HABITS {
        out.push(Observation::new(
            ObservationKind::HoldsToResolution,
            Tone::Neutral,
            "Holds to resolution",
            format!("{} buys and no sells: positions are held until markets resolve.", stats.buys),
        ));
    }

    // Open book
    if stats.total_unrealized_pnl < Decimal::ZERO
        && stats
            .total_unrealized_pnl
            .abs()
            .checked_mul(Decimal::from(4))
            .map_or(true, |loss| loss > stats.total_position_value)
    {
        out.push(Observation::new(
            ObservationKind::UnderwaterBook,
            Tone::Warning,
            "Open positions underwater",
            format!(
                "Unrealized P&L of ${} on ${} of open positions.",
                round_half_up(stats.total_unrealized_pnl, 2),
                round_half_up(stats.total_position_value, 2)
            ),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_stats;
    use crate::models::{ClosedPosition, OpenPosition, Side, TradeRecord};

    fn make_closed(pnl: i64, cents: i64) -> ClosedPosition {
        ClosedPosition {
            realized_pnl: Some(Decimal::from(pnl)),
            avg_price: Some(Decimal::new(cents, 2)),
            title: Some("Will BTC close above 70k?".into()),
        }
    }

    fn make_trade(ts: i64, side: Side, market: &str, title: &str) -> TradeRecord {
        TradeRecord {
            timestamp: ts,
            side: Some(side),
            price: Some(Decimal::new(50, 2)),
            size: Some(Decimal::from(20)),
            usdc_size: Some(Decimal::from(10)),
            condition_id: market.to_string(),
            title: Some(title.to_string()),
            activity_type: None,
        }
    }

    fn kinds(obs: &[Observation]) -> Vec<ObservationKind> {
        obs.iter().map(|o| o.kind).collect()
    }

    #[test]
    fn test_empty_wallet_has_no_observations() {
        let stats = compute_stats(&[], &[], &[]);
        assert!(generate_observations(&stats).is_empty());
    }

    #[test]
    fn test_strong_win_rate_and_longshots() {
        let mut closed: Vec<ClosedPosition> = (0..8).map(|_| make_closed(30, 10)).collect();
        closed.extend((0..2).map(|_| make_closed(-10, 55)));
        let stats = compute_stats(&[], &[], &closed);
        let obs = generate_observations(&stats);

        assert_eq!(
            kinds(&obs),
            vec![ObservationKind::StrongWinRate, ObservationKind::LongshotBias]
        );
        assert_eq!(obs[1].tone, Tone::Neutral);
    }

    #[test]
    fn test_losses_outweigh_wins() {
        let mut closed: Vec<ClosedPosition> = (0..3).map(|_| make_closed(10, 50)).collect();
        closed.extend((0..7).map(|_| make_closed(-20, 90)));
        let stats = compute_stats(&[], &[], &closed);
        let obs = kinds(&generate_observations(&stats));

        assert!(obs.contains(&ObservationKind::WeakWinRate));
        assert!(obs.contains(&ObservationKind::LossesOutweighWins));
        assert!(obs.contains(&ObservationKind::FavoriteBias));
    }

    #[test]
    fn test_no_losing_positions() {
        let stats = compute_stats(&[], &[], &[make_closed(5, 50)]);
        let obs = kinds(&generate_observations(&stats));
        assert_eq!(obs, vec![ObservationKind::NoLosingPositions]);
    }

    #[test]
    fn test_trading_habits() {
        // 2024-03-15 02:00 UTC; all buys, all crypto, same day
        let base = 1_710_468_000;
        let activity: Vec<TradeRecord> = (0..25)
            .map(|i| {
                let market = format!("0x{i}");
                make_trade(base + i * 60, Side::Buy, &market, "Bitcoin up or down")
            })
            .collect();
        let stats = compute_stats(&activity, &[], &[]);
        let obs = kinds(&generate_observations(&stats));

        assert_eq!(
            obs,
            vec![
                ObservationKind::CategoryConcentration,
                ObservationKind::HighFrequency,
                ObservationKind::NightTrading,
                ObservationKind::HoldsToResolution,
            ]
        );
    }

    #[test]
    fn test_underwater_book() {
        let positions = vec![OpenPosition {
            current_value: Some(Decimal::from(100)),
            cash_pnl: Some(Decimal::from(-60)),
            ..Default::default()
        }];
        let stats = compute_stats(&[], &positions, &[]);
        let obs = generate_observations(&stats);
        assert_eq!(kinds(&obs), vec![ObservationKind::UnderwaterBook]);
        assert_eq!(obs[0].tone, Tone::Warning);
    }

    #[test]
    fn test_unclassified_markets_are_not_a_specialty() {
        // Six unclassifiable markets, spread over the afternoon
        let base = 1_710_513_000;
        let activity: Vec<TradeRecord> = (0..6)
            .map(|i| {
                let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                make_trade(base + i * 600, side, &format!("0x{i}"), "Will it rain in Lisbon?")
            })
            .collect();
        let stats = compute_stats(&activity, &[], &[]);
        assert_eq!(stats.categories[&Category::Other], 6);

        let obs = kinds(&generate_observations(&stats));
        assert!(!obs.contains(&ObservationKind::CategoryConcentration));
    }

    #[test]
    fn test_huge_unrealized_loss_is_underwater() {
        let positions = vec![OpenPosition {
            current_value: Some(Decimal::MAX),
            cash_pnl: Some(Decimal::MIN),
            ..Default::default()
        }];
        let stats = compute_stats(&[], &positions, &[]);
        let obs = generate_observations(&stats);
        assert_eq!(kinds(&obs), vec![ObservationKind::UnderwaterBook]);
    }

    #[test]
    fn test_details_round_half_up() {
        // 1 win of 16 resolved: 6.25%
        let mut closed = vec![make_closed(10, 50)];
        closed.extend((0..15).map(|_| make_closed(-1, 50)));
        let stats = compute_stats(&[], &[], &closed);
        let obs = generate_observations(&stats);

        assert_eq!(obs[0].kind, ObservationKind::WeakWinRate);
        assert_eq!(obs[0].detail, "Only 6.3% of 16 resolved positions were profitable.");
    }
}
