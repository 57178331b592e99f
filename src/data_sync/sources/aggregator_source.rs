use super::PriceSource;
use crate::data_sync::chain_client::{ChainClient, call_contract};
use crate::errors::MonitorError;
use crate::logic::types::{Quote, QuoteSource, TradingPair};
use alloy_primitives::Address;
use alloy_sol_types::sol;
use async_trait::async_trait;
use std::sync::Arc;

sol! {
    /// Kyber network proxy rate query.
    interface IKyberNetworkProxy {
        function getExpectedRate(address src, address dest, uint256 srcQty) external view returns (uint256 expectedRate, uint256 worstRate);
    }
}

/// Prices a pair through the aggregator's expected/worst rate query.
pub struct AggregatorSource {
    client: Arc<dyn ChainClient>,
    proxy: Address,
}

impl AggregatorSource {
    pub fn new(client: Arc<dyn ChainClient>, proxy: Address) -> Self {
        Self { client, proxy }
    }
}

#[async_trait]
impl PriceSource for AggregatorSource {
    async fn quote(&self, pair: &TradingPair) -> Result<Quote, MonitorError> {
        let call = IKyberNetworkProxy::getExpectedRateCall {
            src: pair.input.get_address(),
            dest: pair.output.get_address(),
            srcQty: pair.input_amount,
        };
        let rates = call_contract(self.client.as_ref(), QuoteSource::Aggregator, self.proxy, call).await?;

        Ok(Quote::new(QuoteSource::Aggregator, pair.clone(), rates.expectedRate).with_secondary(rates.worstRate))
    }
}
