pub mod aggregator_source;
pub mod pool_source;

pub use aggregator_source::AggregatorSource;
pub use pool_source::PoolSource;

use crate::errors::MonitorError;
use crate::logic::types::{Quote, TradingPair};
use async_trait::async_trait;

/// Something that can price a trading pair in output-token smallest units.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn quote(&self, pair: &TradingPair) -> Result<Quote, MonitorError>;
}
