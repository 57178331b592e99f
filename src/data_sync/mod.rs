/// Data Layer
///
/// Everything that talks to the chain and drives the polling loop:
///
/// - JSON-RPC `eth_call` client behind the `ChainClient` trait
/// - Pool and aggregator price sources
/// - Environment and pair-list configuration
/// - The single-flight, fail-closed `PriceMonitor`

pub mod chain_client;
pub mod config;
pub mod pairs_config;
pub mod service;
pub mod sources;


pub use chain_client::{ChainClient, HttpChainClient, call_contract};
pub use config::MonitorConfig;
pub use pairs_config::{PairsConfigRoot, default_pairs, parse_pairs};
pub use service::{MonitorState, PriceMonitor, PriceMonitorBuilder, TickOutcome};
pub use sources::{AggregatorSource, PoolSource, PriceSource};
