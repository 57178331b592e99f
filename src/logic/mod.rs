/// Logic Layer
///
/// Turns the raw quotes of every configured price source into one comparable
/// report row per trading pair.

pub mod pair_checker;
pub mod types;

pub use pair_checker::PairChecker;
pub use types::{Quote, QuoteSource, ReportRow, TradingPair};
