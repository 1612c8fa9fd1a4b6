use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::bucket::WinLossBucket;
use crate::models::{ClosedPosition, TradeRecord};

/// Market categories, in the order they are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Politics,
    Sports,
    Crypto,
    Economy,
    Entertainment,
    Science,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Politics,
        Category::Sports,
        Category::Crypto,
        Category::Economy,
        Category::Entertainment,
        Category::Science,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Sports => "Sports",
            Category::Crypto => "Crypto",
            Category::Economy => "Economy",
            Category::Entertainment => "Entertainment",
            Category::Science => "Science",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword lists, one per category. Keywords are lowercase.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable {
    entries: &'static [(Category, &'static [&'static str])],
}

impl KeywordTable {
    pub const fn new(entries: &'static [(Category, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    pub fn keywords(&self, category: Category) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, k)| *k)
            .unwrap_or(&[])
    }
}

const POLITICS: &[&str] = &[
    "trump", "biden", "harris", "election", "president", "senate", "congress", "governor",
    "democrat", "republican", "parliament", "prime minister", "vote", "nominee", "cabinet",
];

const MARKET_SPORTS: &[&str] = &[
    "nfl", "nba", "mlb", "nhl", "soccer", "football", "basketball", "baseball", "hockey",
    "tennis", "golf", "ufc", "boxing", "f1", "super bowl", "world cup", "premier league",
    "champions league", "olympics",
];

// Win/loss buckets never picked up golf, boxing or the Olympics but do match
// "vs." match-ups and "game" titles.
const POSITION_SPORTS: &[&str] = &[
    "nfl", "nba", "mlb", "nhl", "soccer", "football", "basketball", "baseball", "hockey",
    "tennis", "ufc", "f1", "super bowl", "world cup", "premier league", "champions league",
    "vs.", "game",
];

const CRYPTO: &[&str] = &[
    "bitcoin", "btc", "ethereum", "eth", "solana", "crypto", "xrp", "dogecoin", "doge",
    "memecoin", "airdrop", "stablecoin",
];

const ECONOMY: &[&str] = &[
    "fed", "interest rate", "inflation", "gdp", "recession", "cpi", "unemployment",
    "s&p", "nasdaq", "dow jones", "tariff", "economy", "stock",
];

const ENTERTAINMENT: &[&str] = &[
    "oscar", "grammy", "emmy", "movie", "film", "album", "box office", "netflix",
    "spotify", "celebrity", "youtube", "taylor swift", "billboard",
];

const SCIENCE: &[&str] = &[
    "spacex", "nasa", "openai", "gpt", "artificial intelligence", "climate",
    "temperature", "hurricane", "mars", "vaccine", "pandemic", "science",
];

/// Table used for per-market category counts.
pub const MARKET_CATEGORY_KEYWORDS: KeywordTable = KeywordTable::new(&[
    (Category::Politics, POLITICS),
    (Category::Sports, MARKET_SPORTS),
    (Category::Crypto, CRYPTO),
    (Category::Economy, ECONOMY),
    (Category::Entertainment, ENTERTAINMENT),
    (Category::Science, SCIENCE),
]);

/// Table used for closed-position win/loss buckets. Differs from
/// [`MARKET_CATEGORY_KEYWORDS`] only in its Sports list.
pub const POSITION_CATEGORY_KEYWORDS: KeywordTable = KeywordTable::new(&[
    (Category::Politics, POLITICS),
    (Category::Sports, POSITION_SPORTS),
    (Category::Crypto, CRYPTO),
    (Category::Economy, ECONOMY),
    (Category::Entertainment, ENTERTAINMENT),
    (Category::Science, SCIENCE),
]);

/// Classify a market title: first category (in table order) with a keyword
/// contained in the lowercased title wins, otherwise `Other`.
pub fn classify(title: &str, table: &KeywordTable) -> Category {
    let title = title.to_lowercase();
    table
        .entries
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Count unique markets per category. A market is keyed by `condition_id` and
/// classified by the title of its first trade. All categories are present.
pub fn categorize_markets(
    trades: &[&TradeRecord],
    table: &KeywordTable,
) -> BTreeMap<Category, u32> {
    let mut counts: BTreeMap<Category, u32> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for trade in trades {
        if !seen.insert(trade.condition_id.as_str()) {
            continue;
        }
        *counts.entry(classify(trade.title(), table)).or_insert(0) += 1;
    }

    counts
}

/// Win/loss buckets per category over closed positions. Only categories with
/// at least one position appear.
pub fn calculate_win_loss_by_category(
    closed: &[ClosedPosition],
    table: &KeywordTable,
) -> BTreeMap<Category, WinLossBucket> {
    let mut buckets: BTreeMap<Category, WinLossBucket> = BTreeMap::new();

    for position in closed {
        buckets
            .entry(classify(position.title(), table))
            .or_default()
            .record(position.realized_pnl());
    }

    for bucket in buckets.values_mut() {
        bucket.finalize();
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_trade(condition_id: &str, title: &str) -> TradeRecord {
        TradeRecord {
            condition_id: condition_id.to_string(),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn make_closed(pnl: i64, title: &str) -> ClosedPosition {
        ClosedPosition {
            realized_pnl: Some(Decimal::from(pnl)),
            avg_price: Some(Decimal::new(50, 2)),
            title: Some(title.to_string()),
        }
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify("Will BTC hit 100k", &MARKET_CATEGORY_KEYWORDS), Category::Crypto);
        assert_eq!(classify("NBA Finals Winner", &MARKET_CATEGORY_KEYWORDS), Category::Sports);
        assert_eq!(
            classify("Who wins the Oscar for Best Picture?", &MARKET_CATEGORY_KEYWORDS),
            Category::Entertainment
        );
        assert_eq!(classify("Will it rain in Lisbon?", &MARKET_CATEGORY_KEYWORDS), Category::Other);
    }

    #[test]
    fn test_classify_first_category_wins() {
        // Matches both politics ("trump") and crypto ("bitcoin"); politics is tested first.
        let title = "Will Trump mention Bitcoin in a speech?";
        assert_eq!(classify(title, &MARKET_CATEGORY_KEYWORDS), Category::Politics);
    }

    #[test]
    fn test_tables_differ_on_sports() {
        let shared = [
            Category::Politics,
            Category::Crypto,
            Category::Economy,
            Category::Entertainment,
            Category::Science,
        ];
        for category in shared {
            assert_eq!(
                MARKET_CATEGORY_KEYWORDS.keywords(category),
                POSITION_CATEGORY_KEYWORDS.keywords(category)
            );
        }
        assert_ne!(
            MARKET_CATEGORY_KEYWORDS.keywords(Category::Sports),
            POSITION_CATEGORY_KEYWORDS.keywords(Category::Sports)
        );
        assert!(MARKET_CATEGORY_KEYWORDS.keywords(Category::Other).is_empty());

        let title = "Masters golf tournament winner";
        assert_eq!(classify(title, &MARKET_CATEGORY_KEYWORDS), Category::Sports);
        assert_eq!(classify(title, &POSITION_CATEGORY_KEYWORDS), Category::Other);

        let title = "Lakers vs. Celtics";
        assert_eq!(classify(title, &MARKET_CATEGORY_KEYWORDS), Category::Other);
        assert_eq!(classify(title, &POSITION_CATEGORY_KEYWORDS), Category::Sports);
    }

    #[test]
    fn test_categorize_markets_first_seen_wins() {
        let trades = vec![
            make_trade("0xa", "Bitcoin above 90k on Friday?"),
            make_trade("0xa", "Presidential election winner"),
            make_trade("0xb", "Fed interest rate cut in March?"),
            make_trade("0xc", "Unknown thing"),
        ];
        let refs: Vec<&TradeRecord> = trades.iter().collect();
        let counts = categorize_markets(&refs, &MARKET_CATEGORY_KEYWORDS);

        assert_eq!(counts[&Category::Crypto], 1);
        assert_eq!(counts[&Category::Politics], 0);
        assert_eq!(counts[&Category::Economy], 1);
        assert_eq!(counts[&Category::Other], 1);
        assert_eq!(counts.len(), 7);
        assert_eq!(counts.values().sum::<u32>(), 3);
    }

    #[test]
    fn test_untitled_trade_is_other() {
        let trade = TradeRecord {
            condition_id: "0xd".into(),
            ..Default::default()
        };
        let counts = categorize_markets(&[&trade], &MARKET_CATEGORY_KEYWORDS);
        assert_eq!(counts[&Category::Other], 1);
    }

    #[test]
    fn test_win_loss_by_category() {
        let closed = vec![
            make_closed(40, "Will ETH flip BTC?"),
            make_closed(-10, "Solana ETF approved?"),
            make_closed(0, "Dogecoin to $1?"),
            make_closed(25, "Senate control after midterms"),
        ];
        let buckets = calculate_win_loss_by_category(&closed, &POSITION_CATEGORY_KEYWORDS);

        let crypto = &buckets[&Category::Crypto];
        assert_eq!(crypto.count, 3);
        assert_eq!(crypto.wins, 1);
        assert_eq!(crypto.losses, 1);
        assert_eq!(crypto.total_pnl, Decimal::from(30));

        let politics = &buckets[&Category::Politics];
        assert_eq!(politics.win_rate, Decimal::from(100));

        assert!(!buckets.contains_key(&Category::Sports));

        for bucket in buckets.values() {
            let expected =
                Decimal::from(bucket.wins) / Decimal::from(bucket.count) * Decimal::ONE_HUNDRED;
            assert_eq!(bucket.win_rate, expected);
        }
    }

    #[test]
    fn test_win_loss_by_category_empty() {
        assert!(calculate_win_loss_by_category(&[], &POSITION_CATEGORY_KEYWORDS).is_empty());
    }
}
