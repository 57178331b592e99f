use crate::constants::EthTokenAddress;
use crate::logic::types::TradingPair;
use crate::utils::config_loader::{ConfigLoader, LoadConfigError, load_from_file, parse_toml};
use crate::utils::TokenRef;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct PairsConfigRoot {
    pub pairs: Vec<PairEntry>,
}

/// One `[[pairs]]` entry. `input_amount` is in whole input tokens, e.g. `"1"` or `"0.5"`.
#[derive(Clone, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct PairEntry {
    pub input: TokenRef,
    pub output: TokenRef,
    pub input_amount: String,
}

impl PairEntry {
    pub fn into_pair(self) -> Result<TradingPair, LoadConfigError> {
        let input_amount = self
            .input
            .parse_amount(&self.input_amount)
            .map_err(|e| LoadConfigError::ConfigError(format!("pair {}->{}: {}", self.input, self.output, e)))?;
        Ok(TradingPair::new(self.input, self.output, input_amount))
    }
}

/// The pairs watched when no pairs file is configured: 1 ETH into MKR, DAI, LEND and LINK.
pub fn default_pairs() -> Vec<TradingPair> {
    let one_eth = crate::utils::unit_scale(18);
    [("MKR", EthTokenAddress::MKR), ("DAI", EthTokenAddress::DAI), ("LEND", EthTokenAddress::LEND), ("LINK", EthTokenAddress::LINK)]
        .into_iter()
        .map(|(symbol, address)| TradingPair::new(TokenRef::eth(), TokenRef::new(symbol, address), one_eth))
        .collect()
}

fn into_pairs(root: PairsConfigRoot) -> Result<Vec<TradingPair>, LoadConfigError> {
    if root.pairs.is_empty() {
        return Err(LoadConfigError::ConfigError("no pairs configured".to_string()));
    }
    root.pairs.into_iter().map(PairEntry::into_pair).collect()
}

pub fn parse_pairs(raw_config: &str) -> Result<Vec<TradingPair>, LoadConfigError> {
    into_pairs(parse_toml(raw_config)?)
}

#[async_trait]
impl ConfigLoader for PairsConfigRoot {
    type SectionType = Vec<TradingPair>;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: PairsConfigRoot = load_from_file(file_name).await?;
        into_pairs(root)
    }
}
