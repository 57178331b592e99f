use alloy_primitives::{Address, address};

/// Placeholder address the aggregator uses for native ether.
pub const ETH: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Aggregator rates are always quoted with 18 decimals of precision.
pub const RATE_DECIMALS: u8 = 18;

pub const DEFAULT_DECIMALS: u8 = 18;

#[non_exhaustive]
pub struct EthContractAddress;

impl EthContractAddress {
    // Uniswap V1 exchange directory
    pub const UNISWAP_V1_FACTORY: Address = address!("c0a47dfe034b400b47bdad5fecda2621de6c4d95");
    // Kyber network proxy
    pub const KYBER_NETWORK_PROXY: Address = address!("9AAb3f75489902f3a48495025729a0AF77d4b11e");
}

#[non_exhaustive]
pub struct EthTokenAddress;

impl EthTokenAddress {
    pub const MKR: Address = address!("9f8f72aa9304c8b593d555f12ef6589cc3a579a2");
    pub const DAI: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
    pub const LEND: Address = address!("80fb784b7ed66730e8b1dbd9820afd29931aab03");
    pub const LINK: Address = address!("514910771af9ca656af840dff83e8264ecf986ca");
}
