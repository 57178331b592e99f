use crate::constants::EthContractAddress;
use alloy_primitives::Address;
use chrono_tz::Tz;
use std::time::Duration;
use url::Url;

/// Configuration for the price monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// HTTP RPC URL of the node used for `eth_call`
    pub rpc_http_url: String,
    /// Delay between ticks in milliseconds
    pub polling_interval_ms: u64,
    /// Timeout for HTTP requests in seconds
    pub http_timeout_secs: u64,
    /// Pool directory (Uniswap V1 factory)
    pub factory_address: Address,
    /// Aggregator contract (Kyber network proxy)
    pub aggregator_address: Address,
    /// IANA timezone the report timestamps are rendered in
    pub report_timezone: String,
    /// Optional TOML file with the list of pairs to watch
    pub pairs_config: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            rpc_http_url: "http://127.0.0.1:8545".to_string(),
            polling_interval_ms: 3000,
            http_timeout_secs: 10,
            factory_address: EthContractAddress::UNISWAP_V1_FACTORY,
            aggregator_address: EthContractAddress::KYBER_NETWORK_PROXY,
            report_timezone: "America/Chicago".to_string(),
            pairs_config: None,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let mut config = Self::default();

        if let Some(rpc_http_url) = lookup("RPC_HTTP_URL").or_else(|| lookup("INFURA")) {
            let _url = Url::parse(&rpc_http_url).map_err(|e| eyre::eyre!("Invalid RPC_HTTP_URL: {}", e))?;
            config.rpc_http_url = rpc_http_url;
        }

        if let Some(interval_str) = lookup("POLLING_INTERVAL") {
            config.polling_interval_ms =
                interval_str.parse().map_err(|e| eyre::eyre!("Invalid POLLING_INTERVAL: {}", e))?;
            if config.polling_interval_ms == 0 {
                return Err(eyre::eyre!("Invalid POLLING_INTERVAL: must be greater than zero"));
            }
        }

        if let Some(timeout_str) = lookup("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs =
                timeout_str.parse().map_err(|e| eyre::eyre!("Invalid HTTP_TIMEOUT_SECS: {}", e))?;
        }

        if let Some(factory) = lookup("UNISWAP_FACTORY_ADDRESS") {
            config.factory_address =
                factory.parse().map_err(|e| eyre::eyre!("Invalid UNISWAP_FACTORY_ADDRESS: {}", e))?;
        }

        if let Some(proxy) = lookup("KYBER_NETWORK_PROXY_ADDRESS") {
            config.aggregator_address =
                proxy.parse().map_err(|e| eyre::eyre!("Invalid KYBER_NETWORK_PROXY_ADDRESS: {}", e))?;
        }

        if let Some(timezone) = lookup("REPORT_TIMEZONE") {
            config.report_timezone = timezone;
        }
        config.timezone()?;

        config.pairs_config = lookup("PAIRS_CONFIG");

        Ok(config)
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn timezone(&self) -> eyre::Result<Tz> {
        self.report_timezone.parse::<Tz>().map_err(|e| eyre::eyre!("Invalid REPORT_TIMEZONE: {}", e))
    }
}
