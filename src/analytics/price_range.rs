use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bucket::WinLossBucket;
use crate::models::ClosedPosition;

/// Entry-price bands. Each band includes its upper bound, so 0.20 lands in
/// `UpTo20`; the top band also takes anything above 0.80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "0–20¢")]
    UpTo20,
    #[serde(rename = "20–40¢")]
    UpTo40,
    #[serde(rename = "40–60¢")]
    UpTo60,
    #[serde(rename = "60–80¢")]
    UpTo80,
    #[serde(rename = "80–100¢")]
    UpTo100,
}

impl PriceRange {
    pub const ALL: [PriceRange; 5] = [
        PriceRange::UpTo20,
        PriceRange::UpTo40,
        PriceRange::UpTo60,
        PriceRange::UpTo80,
        PriceRange::UpTo100,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::UpTo20 => "0–20¢",
            PriceRange::UpTo40 => "20–40¢",
            PriceRange::UpTo60 => "40–60¢",
            PriceRange::UpTo80 => "60–80¢",
            PriceRange::UpTo100 => "80–100¢",
        }
    }

    pub fn for_price(price: Decimal) -> Self {
        if price <= Decimal::new(20, 2) {
            PriceRange::UpTo20
        } else if price <= Decimal::new(40, 2) {
            PriceRange::UpTo40
        } else if price <= Decimal::new(60, 2) {
            PriceRange::UpTo60
        } else if price <= Decimal::new(80, 2) {
            PriceRange::UpTo80
        } else {
            PriceRange::UpTo100
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Win/loss buckets by average entry price. All five bands are always present.
pub fn calculate_win_loss_by_price_range(
    closed: &[ClosedPosition],
) -> BTreeMap<PriceRange, WinLossBucket> {
    let mut buckets: BTreeMap<PriceRange, WinLossBucket> = PriceRange::ALL
        .iter()
        .map(|r| (*r, WinLossBucket::default()))
        .collect();

    for position in closed {
        buckets
            .entry(PriceRange::for_price(position.avg_price()))
            .or_default()
            .record(position.realized_pnl());
    }

    for bucket in buckets.values_mut() {
        bucket.finalize();
    }

    buckets
}
