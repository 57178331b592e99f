use crate::constants::RATE_DECIMALS;
use crate::data_sync::sources::PriceSource;
use crate::errors::MonitorError;
use crate::logic::types::{QuoteSource, ReportRow, TradingPair};
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Queries the pool and the aggregator for one pair and builds its report row.
pub struct PairChecker {
    pool: Arc<dyn PriceSource>,
    aggregator: Arc<dyn PriceSource>,
    timezone: Tz,
}

impl PairChecker {
    pub fn new(pool: Arc<dyn PriceSource>, aggregator: Arc<dyn PriceSource>, timezone: Tz) -> Self {
        Self { pool, aggregator, timezone }
    }

    /// Both sources are queried concurrently and both must answer before a row is produced.
    pub async fn check(&self, pair: &TradingPair) -> Result<ReportRow, MonitorError> {
        let start_time = Instant::now();

        let (pool_quote, aggregator_quote) = tokio::try_join!(self.pool.quote(pair), self.aggregator.quote(pair))?;

        let worst_rate = aggregator_quote
            .secondary_amount
            .ok_or_else(|| MonitorError::malformed(QuoteSource::Aggregator, "missing worst rate"))?;

        debug!(
            "{}: pool={} aggregator={}/{} in {:?}",
            pair,
            pool_quote.output_amount,
            aggregator_quote.output_amount,
            worst_rate,
            start_time.elapsed()
        );

        let captured_at = Utc::now().with_timezone(&self.timezone);
        Ok(ReportRow::from_quotes(pair, pool_quote, aggregator_quote, worst_rate, RATE_DECIMALS, captured_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChainError;
    use crate::logic::types::Quote;
    use crate::utils::{TokenRef, parse_scaled, unit_scale};
    use alloy_primitives::{Address, U256};
    use async_trait::async_trait;

    enum Answer {
        Amount(U256, Option<U256>),
        NoPool,
        Down,
    }

    struct FixedSource {
        kind: QuoteSource,
        answer: Answer,
    }

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn quote(&self, pair: &TradingPair) -> Result<Quote, MonitorError> {
            match &self.answer {
                Answer::Amount(amount, secondary) => {
                    let quote = Quote::new(self.kind, pair.clone(), *amount);
                    Ok(match secondary {
                        Some(s) => quote.with_secondary(*s),
                        None => quote,
                    })
                }
                Answer::NoPool => Err(MonitorError::PairNotFound { token: pair.output.get_address() }),
                Answer::Down => Err(MonitorError::unavailable(self.kind, ChainError::Rpc("down".to_string()))),
            }
        }
    }

    fn checker(pool: Answer, aggregator: Answer) -> PairChecker {
        PairChecker::new(
            Arc::new(FixedSource { kind: QuoteSource::Pool, answer: pool }),
            Arc::new(FixedSource { kind: QuoteSource::Aggregator, answer: aggregator }),
            chrono_tz::America::Chicago,
        )
    }

    fn eth_mkr() -> TradingPair {
        TradingPair::new(TokenRef::eth(), TokenRef::repeat_byte("MKR", 0x01), unit_scale(18))
    }

    fn whole(n: u64) -> U256 {
        U256::from(n) * unit_scale(18)
    }

    #[tokio::test]
    async fn test_eth_mkr_row() {
        let checker = checker(Answer::Amount(whole(300), None), Answer::Amount(whole(305), Some(whole(295))));

        let row = checker.check(&eth_mkr()).await.unwrap();
        assert_eq!(row.input_symbol, "ETH");
        assert_eq!(row.output_symbol, "MKR");
        assert_eq!(row.input_amount, "1");
        assert_eq!(row.pool_return, "300");
        assert_eq!(row.aggregator_expected_rate, "305");
        assert_eq!(row.aggregator_worst_rate, "295");
        assert_eq!(row.captured_at.timezone(), chrono_tz::America::Chicago);

        // integer amounts survive next to the display strings
        assert_eq!(row.quote(QuoteSource::Pool).unwrap().output_amount, whole(300));
        assert_eq!(row.quote(QuoteSource::Aggregator).unwrap().secondary_amount, Some(whole(295)));
    }

    #[tokio::test]
    async fn test_fractional_amounts_scale_exactly() {
        let raw = U256::from(123_456_789_000_000_000_001u128);
        let checker = checker(Answer::Amount(raw, None), Answer::Amount(whole(1), Some(whole(1))));

        let row = checker.check(&eth_mkr()).await.unwrap();
        assert_eq!(row.pool_return, "123.456789000000000001");
        assert_eq!(parse_scaled(&row.pool_return, 18).unwrap(), raw);
    }

    #[tokio::test]
    async fn test_no_pool_is_pair_not_found() {
        let checker = checker(Answer::NoPool, Answer::Amount(whole(1), Some(whole(1))));
        let err = checker.check(&eth_mkr()).await.unwrap_err();
        assert!(matches!(err, MonitorError::PairNotFound { token } if token == Address::repeat_byte(0x01)));
    }

    #[tokio::test]
    async fn test_aggregator_down_fails_the_pair() {
        let checker = checker(Answer::Amount(whole(300), None), Answer::Down);
        let err = checker.check(&eth_mkr()).await.unwrap_err();
        assert!(matches!(err, MonitorError::SourceUnavailable { source_kind: QuoteSource::Aggregator, .. }));
    }

    #[tokio::test]
    async fn test_missing_worst_rate_is_malformed() {
        let checker = checker(Answer::Amount(whole(300), None), Answer::Amount(whole(305), None));
        let err = checker.check(&eth_mkr()).await.unwrap_err();
        assert!(matches!(err, MonitorError::MalformedResult { source_kind: QuoteSource::Aggregator, .. }));
    }
}
