use super::PriceSource;
use crate::data_sync::chain_client::{ChainClient, call_contract};
use crate::errors::MonitorError;
use crate::logic::types::{Quote, QuoteSource, TradingPair};
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

sol! {
    /// Uniswap V1 factory: one exchange per token.
    interface IUniswapFactory {
        function getExchange(address token) external view returns (address);
    }

    /// Uniswap V1 exchange (ETH <-> token pool).
    interface IUniswapExchange {
        function getEthToTokenInputPrice(uint256 eth_sold) external view returns (uint256);
        function getTokenToEthInputPrice(uint256 tokens_sold) external view returns (uint256);
    }
}

/// Prices a pair off the reserves of a single ETH/token pool found through the factory.
pub struct PoolSource {
    client: Arc<dyn ChainClient>,
    factory: Address,
}

impl PoolSource {
    pub fn new(client: Arc<dyn ChainClient>, factory: Address) -> Self {
        Self { client, factory }
    }

    /// Resolve the pool for `token`. The factory answers the zero address for unknown tokens.
    pub async fn get_exchange(&self, token: Address) -> Result<Address, MonitorError> {
        let exchange =
            call_contract(self.client.as_ref(), QuoteSource::Pool, self.factory, IUniswapFactory::getExchangeCall { token }).await?;

        if exchange.is_zero() {
            return Err(MonitorError::PairNotFound { token });
        }
        debug!("Exchange for token {:#x} is {:#x}", token, exchange);
        Ok(exchange)
    }

    async fn eth_to_token(&self, token: Address, eth_sold: U256) -> Result<U256, MonitorError> {
        let exchange = self.get_exchange(token).await?;
        call_contract(self.client.as_ref(), QuoteSource::Pool, exchange, IUniswapExchange::getEthToTokenInputPriceCall { eth_sold })
            .await
    }

    async fn token_to_eth(&self, token: Address, tokens_sold: U256) -> Result<U256, MonitorError> {
        let exchange = self.get_exchange(token).await?;
        call_contract(self.client.as_ref(), QuoteSource::Pool, exchange, IUniswapExchange::getTokenToEthInputPriceCall { tokens_sold })
            .await
    }
}

#[async_trait]
impl PriceSource for PoolSource {
    async fn quote(&self, pair: &TradingPair) -> Result<Quote, MonitorError> {
        let output_amount = if pair.input.is_native() {
            self.eth_to_token(pair.output.get_address(), pair.input_amount).await?
        } else if pair.output.is_native() {
            self.token_to_eth(pair.input.get_address(), pair.input_amount).await?
        } else {
            // a single ETH/token pool cannot price token -> token
            return Err(MonitorError::PairNotFound { token: pair.output.get_address() });
        };

        Ok(Quote::new(QuoteSource::Pool, pair.clone(), output_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChainError;
    use crate::utils::TokenRef;
    use alloy_primitives::Bytes;
    use alloy_sol_types::{SolCall, SolValue};
    use std::sync::Mutex;

    const FACTORY: Address = Address::repeat_byte(0xfa);
    const EXCHANGE: Address = Address::repeat_byte(0xec);

    /// Answers factory lookups with `exchange` and every exchange call with `price`.
    struct MockChain {
        exchange: Address,
        price: U256,
        calls: Mutex<Vec<(Address, [u8; 4])>>,
    }

    impl MockChain {
        fn new(exchange: Address, price: U256) -> Self {
            Self { exchange, price, calls: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl ChainClient for MockChain {
        async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
            let selector: [u8; 4] = data[0..4].try_into().unwrap();
            self.calls.lock().unwrap().push((to, selector));
            if to == FACTORY {
                Ok(self.exchange.abi_encode().into())
            } else {
                Ok(self.price.abi_encode().into())
            }
        }
    }

    fn one_eth() -> U256 {
        U256::from(10u64).pow(U256::from(18u64))
    }

    #[tokio::test]
    async fn test_eth_to_token_quote() {
        let chain = Arc::new(MockChain::new(EXCHANGE, U256::from(300u64) * one_eth()));
        let source = PoolSource::new(chain.clone(), FACTORY);
        let pair = TradingPair::new(TokenRef::eth(), TokenRef::repeat_byte("MKR", 0x01), one_eth());

        let quote = source.quote(&pair).await.unwrap();
        assert_eq!(quote.source, QuoteSource::Pool);
        assert_eq!(quote.output_amount, U256::from(300u64) * one_eth());
        assert_eq!(quote.secondary_amount, None);

        let calls = chain.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (FACTORY, IUniswapFactory::getExchangeCall::SELECTOR));
        assert_eq!(calls[1], (EXCHANGE, IUniswapExchange::getEthToTokenInputPriceCall::SELECTOR));
    }

    #[tokio::test]
    async fn test_token_to_eth_uses_input_pool() {
        let chain = Arc::new(MockChain::new(EXCHANGE, U256::from(5u64)));
        let source = PoolSource::new(chain.clone(), FACTORY);
        let pair = TradingPair::new(TokenRef::repeat_byte("DAI", 0x02), TokenRef::eth(), one_eth());

        let quote = source.quote(&pair).await.unwrap();
        assert_eq!(quote.output_amount, U256::from(5u64));
        let calls = chain.calls.lock().unwrap();
        assert_eq!(calls[1], (EXCHANGE, IUniswapExchange::getTokenToEthInputPriceCall::SELECTOR));
    }

    #[tokio::test]
    async fn test_missing_pool_is_pair_not_found() {
        let chain = Arc::new(MockChain::new(Address::ZERO, U256::ZERO));
        let source = PoolSource::new(chain.clone(), FACTORY);
        let output = TokenRef::repeat_byte("LEND", 0x03);
        let pair = TradingPair::new(TokenRef::eth(), output.clone(), one_eth());

        let err = source.quote(&pair).await.unwrap_err();
        assert!(matches!(err, MonitorError::PairNotFound { token } if token == output.get_address()));
        // no price call after a failed lookup
        assert_eq!(chain.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_token_to_token_is_not_quotable() {
        let chain = Arc::new(MockChain::new(EXCHANGE, U256::ZERO));
        let source = PoolSource::new(chain.clone(), FACTORY);
        let pair = TradingPair::new(TokenRef::repeat_byte("A", 0x0a), TokenRef::repeat_byte("B", 0x0b), one_eth());

        assert!(matches!(source.quote(&pair).await, Err(MonitorError::PairNotFound { .. })));
        assert!(chain.calls.lock().unwrap().is_empty());
    }
}
