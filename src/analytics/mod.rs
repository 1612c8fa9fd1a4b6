pub mod bucket;
pub mod category;
pub mod price_range;
pub mod ratio;
pub mod stats;
pub mod win_loss;

pub use bucket::WinLossBucket;
pub use category::{
    calculate_win_loss_by_category, categorize_markets, classify, Category, KeywordTable,
    MARKET_CATEGORY_KEYWORDS, POSITION_CATEGORY_KEYWORDS,
};
pub use price_range::{calculate_win_loss_by_price_range, PriceRange};
pub use ratio::Ratio;
pub use stats::{
    compute_stats, compute_stats_with, ClassificationTables, DayDistribution, MonthlyVolume, Stats,
};
pub use win_loss::{calculate_win_loss_stats, WinLossStats};
