use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Result of a guarded division.
///
/// `Infinite` stands for a positive numerator over a zero denominator,
/// `Undefined` for zero over zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    Finite(Decimal),
    Infinite,
    Undefined,
}

impl Ratio {
    /// Divide `numerator` by `denominator`. A zero denominator, or a quotient
    /// too large for `Decimal`, yields `Infinite` when the numerator is
    /// positive and `Undefined` otherwise.
    pub fn of(numerator: Decimal, denominator: Decimal) -> Self {
        match numerator.checked_div(denominator) {
            Some(v) => Ratio::Finite(v),
            None if numerator > Decimal::ZERO => Ratio::Infinite,
            None => Ratio::Undefined,
        }
    }

    /// Same as [`Ratio::of`] with the finite value rounded half away from
    /// zero to `dp` places.
    pub fn rounded(numerator: Decimal, denominator: Decimal, dp: u32) -> Self {
        match Self::of(numerator, denominator) {
            Ratio::Finite(v) => Ratio::Finite(round_half_up(v, dp)),
            other => other,
        }
    }
}

/// Round to `dp` places with midpoints away from zero (1.25 -> 1.3).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::Finite(Decimal::ZERO)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Finite(v) => write!(f, "{v}"),
            Ratio::Infinite => f.write_str("∞"),
            Ratio::Undefined => f.write_str("N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_ratio() {
        assert_eq!(
            Ratio::of(Decimal::from(50), Decimal::from(20)),
            Ratio::Finite(Decimal::new(25, 1))
        );
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Ratio::of(Decimal::from(3), Decimal::ZERO), Ratio::Infinite);
        assert_eq!(Ratio::of(Decimal::ZERO, Decimal::ZERO), Ratio::Undefined);
    }

    #[test]
    fn test_rounded() {
        let r = Ratio::rounded(Decimal::from(2), Decimal::from(3), 2);
        assert_eq!(r, Ratio::Finite(Decimal::new(67, 2)));
    }

    #[test]
    fn test_rounded_midpoint_goes_up() {
        // 1 / 8 = 0.125
        let r = Ratio::rounded(Decimal::ONE, Decimal::from(8), 2);
        assert_eq!(r, Ratio::Finite(Decimal::new(13, 2)));
        assert_eq!(round_half_up(Decimal::new(125, 2), 1), Decimal::new(13, 1));
    }

    #[test]
    fn test_overflowing_quotient() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(Ratio::of(Decimal::MAX, tiny), Ratio::Infinite);
        assert_eq!(Ratio::of(Decimal::MIN, tiny), Ratio::Undefined);
    }

    #[test]
    fn test_display_and_serialize() {
        assert_eq!(Ratio::Infinite.to_string(), "∞");
        assert_eq!(Ratio::Undefined.to_string(), "N/A");

        let json = serde_json::to_value(Ratio::Infinite).unwrap();
        assert_eq!(json["kind"], "infinite");
        let json = serde_json::to_value(Ratio::Finite(Decimal::new(25, 1))).unwrap();
        assert_eq!(json["kind"], "finite");
        assert_eq!(json["value"], "2.5");
    }
}
