//! Network-aware address encoding and decoding.
//!
//! This module bridges the Network enum with address codecs, providing
//! convenient functions to encode/decode addresses using network identifiers.

use super::{
    from_output_script, to_output_script_try_codecs, AddressCodec, AddressError,
    Base58CheckCodec, CashAddrCodec, Result,
};
use crate::bitcoin::{Script, ScriptBuf};
use crate::networks::Network;

/// Address encoding format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFormat {
    /// `prefix:payload` cashaddr, the default for all supported networks.
    #[default]
    Cashaddr,
    /// Base58Check with the network's legacy version bytes.
    Legacy,
}

impl AddressFormat {
    /// Parse an AddressFormat from an optional string.
    /// Returns Cashaddr if None or if the string is empty.
    pub fn from_optional_str(s: Option<&str>) -> Result<Self> {
        match s {
            None | Some("") | Some("default") | Some("cashaddr") => Ok(Self::Cashaddr),
            Some("legacy") | Some("base58") => Ok(Self::Legacy),
            Some(other) => Err(AddressError::InvalidAddress(format!(
                "Unknown address format: {}. Valid formats are: 'default', 'cashaddr', 'legacy'",
                other
            ))),
        }
    }
}

fn cashaddr_codec(network: Network) -> CashAddrCodec {
    CashAddrCodec::new(network.params().cash_addr_prefix)
}

/// Convert an address string to an output script using a Network.
/// Accepts both cashaddr (with or without prefix) and legacy addresses.
pub fn to_output_script_with_network(address: &str, network: Network) -> Result<ScriptBuf> {
    let cashaddr = cashaddr_codec(network);
    let legacy = Base58CheckCodec::for_network(network);
    to_output_script_try_codecs(address, &[&cashaddr, &legacy])
}

/// Convert an output script to an address string using a Network and format.
pub fn from_output_script_with_network(
    script: &Script,
    network: Network,
    format: AddressFormat,
) -> Result<String> {
    match format {
        AddressFormat::Cashaddr => from_output_script(script, &cashaddr_codec(network)),
        AddressFormat::Legacy => from_output_script(script, &Base58CheckCodec::for_network(network)),
    }
}

fn network_from_coin(coin: &str) -> Result<Network> {
    Network::from_coin_name(coin)
        .ok_or_else(|| AddressError::InvalidAddress(format!("Unknown coin: {}", coin)))
}

/// Convert an address string to an output script using a coin name.
/// The coin name is first converted to a Network using `Network::from_coin_name()`.
pub fn to_output_script_with_coin(address: &str, coin: &str) -> Result<ScriptBuf> {
    to_output_script_with_network(address, network_from_coin(coin)?)
}

/// Convert an output script to an address string using a coin name and format.
pub fn from_output_script_with_coin(
    script: &Script,
    coin: &str,
    format: AddressFormat,
) -> Result<String> {
    from_output_script_with_network(script, network_from_coin(coin)?, format)
}
