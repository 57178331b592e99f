// Two-Layer Architecture
pub mod data_sync; // Data Layer: chain access, price sources, polling loop
pub mod logic; // Logic Layer: pair checks and quote normalization

// Common utilities and types
pub mod constants;
pub mod errors;
pub mod utils;

// Re-export key components from each layer
pub use data_sync::{
    AggregatorSource, ChainClient, HttpChainClient, MonitorConfig, MonitorState, PoolSource, PriceMonitor,
    PriceMonitorBuilder, PriceSource, TickOutcome,
};
pub use errors::{ChainError, MonitorError};
pub use logic::{PairChecker, Quote, QuoteSource, ReportRow, TradingPair};
pub use utils::{Reporter, TableReporter, TokenRef};
