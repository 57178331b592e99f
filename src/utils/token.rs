use crate::constants::{DEFAULT_DECIMALS, ETH};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,
    #[error("invalid digit in amount {0:?}")]
    InvalidDigit(String),
    #[error("amount {amount:?} has more than {decimals} decimals")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("amount {0:?} overflows 256 bits")]
    Overflow(String),
}

/// A token as seen by the monitor. Identity is the address; the symbol is display only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRef {
    symbol: String,
    address: Address,
    #[serde(default = "default_decimals")]
    decimals: u8,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

impl Hash for TokenRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state)
    }
}

impl PartialEq for TokenRef {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for TokenRef {}

impl Display for TokenRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl TokenRef {
    pub fn new(symbol: impl Into<String>, address: Address) -> TokenRef {
        TokenRef { symbol: symbol.into(), address, decimals: DEFAULT_DECIMALS }
    }

    pub fn eth() -> TokenRef {
        TokenRef::new("ETH", ETH)
    }

    // For testing purposes
    pub fn repeat_byte(symbol: &str, byte: u8) -> TokenRef {
        TokenRef::new(symbol, Address::repeat_byte(byte))
    }

    pub fn get_symbol(&self) -> &str {
        &self.symbol
    }

    pub fn get_address(&self) -> Address {
        self.address
    }

    pub fn get_decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_native(&self) -> bool {
        self.address == ETH
    }

    /// Render an amount in smallest units as a decimal string in whole tokens.
    pub fn to_decimal_string(&self, value: U256) -> String {
        format_scaled(value, self.decimals)
    }

    /// Parse a whole-token decimal string (e.g. "1.5") into smallest units.
    pub fn parse_amount(&self, amount: &str) -> Result<U256, AmountParseError> {
        parse_scaled(amount, self.decimals)
    }
}

/// 10^decimals
pub fn unit_scale(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Exact integer rendering of `value / 10^decimals`, trailing zeros trimmed.
pub fn format_scaled(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let (whole, rem) = value.div_rem(unit_scale(decimals));
    if rem.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", rem.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

pub fn parse_scaled(amount: &str, decimals: u8) -> Result<U256, AmountParseError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AmountParseError::Empty);
    }
    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(AmountParseError::InvalidDigit(amount.to_string()));
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(AmountParseError::InvalidDigit(amount.to_string()));
    }
    let frac = frac.trim_end_matches('0');
    if frac.len() > decimals as usize {
        return Err(AmountParseError::TooPrecise { amount: amount.to_string(), decimals });
    }

    let digits = format!("{}{:0<width$}", whole, frac, width = decimals as usize);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| AmountParseError::Overflow(amount.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_equality_ignores_symbol_and_case() {
        let lower: Address = "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2".parse().unwrap();
        let upper: Address = "0x9F8F72AA9304C8B593D555F12EF6589CC3A579A2".parse().unwrap();
        assert_eq!(TokenRef::new("MKR", lower), TokenRef::new("Maker", upper));
        assert_ne!(TokenRef::repeat_byte("A", 0x01), TokenRef::repeat_byte("A", 0x02));
    }

    #[test]
    fn test_format_scaled() {
        let eth = TokenRef::eth();
        assert_eq!(eth.to_decimal_string(U256::from(300u64) * unit_scale(18)), "300");
        assert_eq!(eth.to_decimal_string(U256::from(1_500_000_000_000_000_000u128)), "1.5");
        assert_eq!(eth.to_decimal_string(U256::from(1u64)), "0.000000000000000001");
        assert_eq!(eth.to_decimal_string(U256::ZERO), "0");
        assert_eq!(format_scaled(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_parse_amount() {
        let eth = TokenRef::eth();
        assert_eq!(eth.parse_amount("1").unwrap(), unit_scale(18));
        assert_eq!(eth.parse_amount("0.25").unwrap(), U256::from(250_000_000_000_000_000u128));
        assert_eq!(eth.parse_amount(".5").unwrap(), U256::from(500_000_000_000_000_000u128));
        assert_eq!(eth.parse_amount("0").unwrap(), U256::ZERO);
        assert_eq!(eth.parse_amount(""), Err(AmountParseError::Empty));
        assert!(matches!(eth.parse_amount("1e18"), Err(AmountParseError::InvalidDigit(_))));
        assert!(matches!(eth.parse_amount("0.0000000000000000001"), Err(AmountParseError::TooPrecise { .. })));
    }

    #[test]
    fn test_normalization_round_trip() {
        let samples = [
            U256::ZERO,
            U256::from(1u64),
            U256::from(305u64) * unit_scale(18),
            U256::from(123_456_789_012_345_678_901u128),
            U256::MAX,
        ];
        for raw in samples {
            let rendered = format_scaled(raw, 18);
            assert_eq!(parse_scaled(&rendered, 18).unwrap(), raw, "round trip of {}", rendered);
        }
    }

    #[test]
    fn test_serialize() {
        let token = TokenRef::new("MKR", Address::repeat_byte(0x11));
        let serialized = serde_json::to_string(&token).unwrap();
        assert_eq!(
            serialized,
            "{\"symbol\":\"MKR\",\"address\":\"0x1111111111111111111111111111111111111111\",\"decimals\":18}"
        );
    }
}
