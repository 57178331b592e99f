use crate::utils::{TokenRef, format_scaled};
use alloy_primitives::U256;
use chrono::DateTime;
use chrono_tz::Tz;
use strum_macros::Display;

/// Which kind of on-chain venue produced a quote.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum QuoteSource {
    Pool,
    Aggregator,
}

/// A fixed pair to watch, with the input amount in the input token's smallest unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradingPair {
    pub input: TokenRef,
    pub output: TokenRef,
    pub input_amount: U256,
}

impl TradingPair {
    pub fn new(input: TokenRef, output: TokenRef, input_amount: U256) -> Self {
        Self { input, output, input_amount }
    }
}

impl std::fmt::Display for TradingPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.input, self.output)
    }
}

/// Output of a single price source for a single pair, in smallest units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub source: QuoteSource,
    pub pair: TradingPair,
    pub output_amount: U256,
    /// Worst-case bound when the source reports one.
    pub secondary_amount: Option<U256>,
}

impl Quote {
    pub fn new(source: QuoteSource, pair: TradingPair, output_amount: U256) -> Self {
        Self { source, pair, output_amount, secondary_amount: None }
    }

    pub fn with_secondary(mut self, secondary_amount: U256) -> Self {
        self.secondary_amount = Some(secondary_amount);
        self
    }
}

/// Human-scaled view of one pair's quotes. Only used for rendering.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub input_symbol: String,
    pub output_symbol: String,
    pub input_amount: String,
    pub pool_return: String,
    pub aggregator_expected_rate: String,
    pub aggregator_worst_rate: String,
    pub captured_at: DateTime<Tz>,
    /// Raw quotes the row was built from; comparisons belong on these, not on the strings.
    pub quotes: Vec<Quote>,
}

impl ReportRow {
    pub fn from_quotes(
        pair: &TradingPair,
        pool: Quote,
        aggregator: Quote,
        aggregator_worst: U256,
        rate_decimals: u8,
        captured_at: DateTime<Tz>,
    ) -> Self {
        Self {
            input_symbol: pair.input.get_symbol().to_string(),
            output_symbol: pair.output.get_symbol().to_string(),
            input_amount: pair.input.to_decimal_string(pair.input_amount),
            pool_return: pair.output.to_decimal_string(pool.output_amount),
            aggregator_expected_rate: format_scaled(aggregator.output_amount, rate_decimals),
            aggregator_worst_rate: format_scaled(aggregator_worst, rate_decimals),
            captured_at,
            quotes: vec![pool, aggregator],
        }
    }

    pub fn quote(&self, source: QuoteSource) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.source == source)
    }
}
