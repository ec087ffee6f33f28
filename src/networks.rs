//! Definitions of the cashaddr networks and their address parameters.
// Values from src/chainparams.cpp of the respective node implementations.
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    // https://github.com/bitcoin-cash-node/bitcoin-cash-node/blob/master/src/chainparams.cpp
    BitcoinCash,
    BitcoinCashTestnet,
    BitcoinCashRegtest,

    // https://github.com/Bitcoin-ABC/bitcoin-abc/blob/master/src/chainparams.cpp
    Ecash,
    EcashTestnet,
}

/// Address parameters of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    /// Cashaddr prefix, always lowercase
    pub cash_addr_prefix: &'static str,
    /// Base58Check version byte of legacy P2PKH addresses
    pub legacy_pub_key_hash: u8,
    /// Base58Check version byte of legacy P2SH addresses
    pub legacy_script_hash: u8,
}

const MAINNET_LEGACY: (u8, u8) = (0x00, 0x05);
const TESTNET_LEGACY: (u8, u8) = (0x6f, 0xc4);

impl NetworkParams {
    const fn new(cash_addr_prefix: &'static str, legacy: (u8, u8)) -> Self {
        Self {
            cash_addr_prefix,
            legacy_pub_key_hash: legacy.0,
            legacy_script_hash: legacy.1,
        }
    }
}

impl Network {
    /// Array containing all network variants
    pub const ALL: &'static [Network] = &[
        Network::BitcoinCash,
        Network::BitcoinCashTestnet,
        Network::BitcoinCashRegtest,
        Network::Ecash,
        Network::EcashTestnet,
    ];

    pub const fn params(&self) -> NetworkParams {
        match self {
            Network::BitcoinCash => NetworkParams::new("bitcoincash", MAINNET_LEGACY),
            Network::BitcoinCashTestnet => NetworkParams::new("bchtest", TESTNET_LEGACY),
            Network::BitcoinCashRegtest => NetworkParams::new("bchreg", TESTNET_LEGACY),
            Network::Ecash => NetworkParams::new("ecash", MAINNET_LEGACY),
            Network::EcashTestnet => NetworkParams::new("ectest", TESTNET_LEGACY),
        }
    }

    /// Returns the canonical string name of this network
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::BitcoinCash => "BitcoinCash",
            Network::BitcoinCashTestnet => "BitcoinCashTestnet",
            Network::BitcoinCashRegtest => "BitcoinCashRegtest",
            Network::Ecash => "Ecash",
            Network::EcashTestnet => "EcashTestnet",
        }
    }

    pub fn from_name_exact(name: &str) -> Option<Network> {
        match name {
            "BitcoinCash" => Some(Network::BitcoinCash),
            "BitcoinCashTestnet" => Some(Network::BitcoinCashTestnet),
            "BitcoinCashRegtest" => Some(Network::BitcoinCashRegtest),
            "Ecash" => Some(Network::Ecash),
            "EcashTestnet" => Some(Network::EcashTestnet),
            _ => None,
        }
    }

    /// Convert a coin ticker name to a Network.
    pub fn from_coin_name(name: &str) -> Option<Network> {
        match name {
            "bch" => Some(Network::BitcoinCash),
            "tbch" => Some(Network::BitcoinCashTestnet),
            "bchreg" => Some(Network::BitcoinCashRegtest),
            "xec" => Some(Network::Ecash),
            "txec" => Some(Network::EcashTestnet),
            _ => None,
        }
    }

    /// Find the network a cashaddr prefix belongs to.
    pub fn from_cash_addr_prefix(prefix: &str) -> Option<Network> {
        Network::ALL
            .iter()
            .copied()
            .find(|network| network.params().cash_addr_prefix == prefix)
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::BitcoinCash | Network::Ecash)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    /// Accepts the canonical name or the coin name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::from_name_exact(s)
            .or_else(|| Network::from_coin_name(s))
            .ok_or_else(|| format!("Unknown network: {}", s))
    }
}
