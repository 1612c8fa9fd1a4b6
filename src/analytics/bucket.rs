use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Win/loss tally for one slice of closed positions.
///
/// `wins + losses <= count`; breakeven positions only add to `count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinLossBucket {
    pub count: u32,
    pub wins: u32,
    pub losses: u32,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
}

impl WinLossBucket {
    pub(crate) fn record(&mut self, pnl: Decimal) {
        self.count += 1;
        if pnl > Decimal::ZERO {
            self.wins += 1;
        } else if pnl < Decimal::ZERO {
            self.losses += 1;
        }
        self.total_pnl = saturating_add(self.total_pnl, pnl);
    }

    /// Second pass, run once all positions have been recorded.
    pub(crate) fn finalize(&mut self) {
        self.win_rate = percentage(self.wins as usize, self.count as usize);
    }
}

/// `a + b`, clamped to `Decimal::MAX` / `Decimal::MIN` instead of panicking.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b > Decimal::ZERO {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Overflow-safe sum, see [`saturating_add`].
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}

/// `part / whole * 100`, zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part as u64) / Decimal::from(whole as u64) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_finalize() {
        let mut bucket = WinLossBucket::default();
        bucket.record(Decimal::from(10));
        bucket.record(Decimal::from(-4));
        bucket.record(Decimal::ZERO);
        bucket.record(Decimal::from(6));
        bucket.finalize();

        assert_eq!(bucket.count, 4);
        assert_eq!(bucket.wins, 2);
        assert_eq!(bucket.losses, 1);
        assert_eq!(bucket.total_pnl, Decimal::from(12));
        assert_eq!(bucket.win_rate, Decimal::from(50));
    }

    #[test]
    fn test_saturating_add_clamps() {
        assert_eq!(saturating_add(Decimal::MAX, Decimal::ONE), Decimal::MAX);
        assert_eq!(saturating_add(Decimal::MIN, Decimal::NEGATIVE_ONE), Decimal::MIN);
        assert_eq!(
            saturating_sum([Decimal::from(2), Decimal::from(-5), Decimal::from(4)]),
            Decimal::ONE
        );
    }

    #[test]
    fn test_record_huge_pnl_does_not_panic() {
        let mut bucket = WinLossBucket::default();
        bucket.record(Decimal::MAX);
        bucket.record(Decimal::MAX);
        bucket.finalize();
        assert_eq!(bucket.total_pnl, Decimal::MAX);
        assert_eq!(bucket.wins, 2);
    }

    #[test]
    fn test_percentage_empty() {
        assert_eq!(percentage(0, 0), Decimal::ZERO);
        assert_eq!(percentage(3, 0), Decimal::ZERO);
    }
}
