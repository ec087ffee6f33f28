use super::base58check::{from_base58_check, to_base58_check};
use super::cashaddr::{self, pack_addr_data, AddrContent, AddrType};
use super::{AddressError, AddressFormat, Result};
use crate::bitcoin::hashes::Hash;
use crate::bitcoin::{PubkeyHash, PublicKey, Script, ScriptBuf, ScriptHash};
use crate::networks::Network;
use std::fmt;

/// Length of the hash160 committed to by P2PKH and P2SH addresses.
pub const HASH160_LENGTH: usize = 20;

const COMPRESSED_PUBKEY_HEX_LENGTH: usize = 66;
const UNCOMPRESSED_PUBKEY_HEX_LENGTH: usize = 130;

/// Serialization of a public key address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PubKeyFormat {
    Compressed,
    Uncompressed,
}

/// A payment destination on a specific network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Pay-to-pubkey-hash
    PubKeyHash {
        hash: [u8; HASH160_LENGTH],
        network: Network,
    },
    /// Pay-to-script-hash
    ScriptHash {
        hash: [u8; HASH160_LENGTH],
        network: Network,
    },
    /// A bare public key, paid to through its P2PKH address
    PubKey { pubkey: PublicKey, network: Network },
}

fn to_hash160(hash: &[u8]) -> Result<[u8; HASH160_LENGTH]> {
    hash.try_into().map_err(|_| {
        AddressError::InvalidAddress(format!(
            "Hash must be {} bytes, got {}",
            HASH160_LENGTH,
            hash.len()
        ))
    })
}

impl Address {
    pub fn p2pkh_from_hash(hash: &[u8], network: Network) -> Result<Address> {
        Ok(Address::PubKeyHash {
            hash: to_hash160(hash)?,
            network,
        })
    }

    pub fn p2sh_from_hash(hash: &[u8], network: Network) -> Result<Address> {
        Ok(Address::ScriptHash {
            hash: to_hash160(hash)?,
            network,
        })
    }

    /// Build the P2SH address of a redeem script.
    pub fn p2sh_from_script(script: &Script, network: Network) -> Address {
        Address::ScriptHash {
            hash: ScriptHash::hash(script.as_bytes()).to_byte_array(),
            network,
        }
    }

    /// Build a public key address from a serialized (33 or 65 byte) public key.
    pub fn from_pubkey_bytes(bytes: &[u8], network: Network) -> Result<Address> {
        let pubkey =
            PublicKey::from_slice(bytes).map_err(|e| AddressError::InvalidPublicKey(e.to_string()))?;
        Ok(Address::PubKey { pubkey, network })
    }

    fn from_content(content: AddrContent, network: Network) -> Result<Address> {
        match content.addr_type {
            AddrType::PUB_KEY_HASH => Address::p2pkh_from_hash(&content.hash, network),
            AddrType::SCRIPT_HASH => Address::p2sh_from_hash(&content.hash, network),
            other => Err(AddressError::UnsupportedAddressType(other.to_u8())),
        }
    }

    pub fn network(&self) -> Network {
        match self {
            Address::PubKeyHash { network, .. }
            | Address::ScriptHash { network, .. }
            | Address::PubKey { network, .. } => *network,
        }
    }

    pub fn is_for_network(&self, network: Network) -> bool {
        self.network() == network
    }

    pub fn pubkey_format(&self) -> Option<PubKeyFormat> {
        match self {
            Address::PubKey { pubkey, .. } if pubkey.compressed => Some(PubKeyFormat::Compressed),
            Address::PubKey { .. } => Some(PubKeyFormat::Uncompressed),
            _ => None,
        }
    }

    /// The cashaddr type the address is encoded with.
    pub fn addr_type(&self) -> AddrType {
        match self {
            Address::ScriptHash { .. } => AddrType::SCRIPT_HASH,
            Address::PubKeyHash { .. } | Address::PubKey { .. } => AddrType::PUB_KEY_HASH,
        }
    }

    /// The hash160 that appears in the encoded address.
    pub fn hash160(&self) -> [u8; HASH160_LENGTH] {
        match self {
            Address::PubKeyHash { hash, .. } | Address::ScriptHash { hash, .. } => *hash,
            Address::PubKey { pubkey, .. } => pubkey.pubkey_hash().to_byte_array(),
        }
    }

    /// The raw bytes the address commits to: the hash, or the serialized public key.
    pub fn script_address(&self) -> Vec<u8> {
        match self {
            Address::PubKey { pubkey, .. } => pubkey.to_bytes(),
            _ => self.hash160().to_vec(),
        }
    }

    pub fn encode_address(&self, format: AddressFormat) -> Result<String> {
        let params = self.network().params();
        let hash = self.hash160();
        match format {
            AddressFormat::Cashaddr => Ok(cashaddr::encode(
                params.cash_addr_prefix,
                &pack_addr_data(&hash, self.addr_type()),
            )?),
            AddressFormat::Legacy => {
                let version = match self.addr_type() {
                    AddrType::SCRIPT_HASH => params.legacy_script_hash,
                    _ => params.legacy_pub_key_hash,
                };
                Ok(to_base58_check(&hash, version))
            }
        }
    }

    pub fn to_output_script(&self) -> ScriptBuf {
        let hash = self.hash160();
        match self.addr_type() {
            AddrType::SCRIPT_HASH => ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(hash)),
            _ => ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(hash)),
        }
    }

    pub fn from_output_script(script: &Script, network: Network) -> Result<Address> {
        if script.is_p2pkh() {
            Address::p2pkh_from_hash(&script.as_bytes()[3..23], network)
        } else if script.is_p2sh() {
            Address::p2sh_from_hash(&script.as_bytes()[2..22], network)
        } else {
            Err(AddressError::UnsupportedScriptType(
                "Only P2PKH and P2SH scripts have an address".to_string(),
            ))
        }
    }
}

impl fmt::Display for Address {
    /// Public key addresses are shown as the hex serialized key, everything else as cashaddr.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::PubKey { pubkey, .. } => write!(f, "{}", hex::encode(pubkey.to_bytes())),
            _ => {
                let encoded = self
                    .encode_address(AddressFormat::Cashaddr)
                    .map_err(|_| fmt::Error)?;
                f.write_str(&encoded)
            }
        }
    }
}

/// Decode an address for `network`.
///
/// In order, the string is tried as:
/// 1. a cashaddr, the prefix being optional
/// 2. a hex serialized public key
/// 3. a legacy Base58Check address
///
/// A string with an explicit `prefix:` is only ever treated as a cashaddr.
pub fn decode_address(address: &str, network: Network) -> Result<Address> {
    let prefix = network.params().cash_addr_prefix;

    match cashaddr::decode(address, prefix) {
        Ok((decoded_prefix, payload)) => {
            if decoded_prefix != prefix {
                return Err(cashaddr::Error::PrefixMismatch {
                    expected: prefix.to_string(),
                    got: decoded_prefix,
                }
                .into());
            }
            let content = cashaddr::content::parse_content(&payload)?;
            return Address::from_content(content, network);
        }
        Err(e) if address.contains(cashaddr::SEPARATOR) => return Err(e.into()),
        Err(e) => tracing::debug!(%address, error = %e, "not a cashaddr, trying other formats"),
    }

    if matches!(
        address.len(),
        COMPRESSED_PUBKEY_HEX_LENGTH | UNCOMPRESSED_PUBKEY_HEX_LENGTH
    ) {
        if let Ok(bytes) = hex::decode(address) {
            return Address::from_pubkey_bytes(&bytes, network);
        }
    }

    let (version, hash) = from_base58_check(address)?;
    let params = network.params();
    let is_p2pkh = version == params.legacy_pub_key_hash;
    let is_p2sh = version == params.legacy_script_hash;

    match (is_p2pkh, is_p2sh) {
        (true, true) => Err(AddressError::AddressCollision),
        (true, false) => Address::p2pkh_from_hash(&hash, network),
        (false, true) => Address::p2sh_from_hash(&hash, network),
        (false, false) => {
            tracing::debug!(%address, version, %network, "legacy version byte not for network");
            Err(AddressError::InvalidAddress(format!(
                "Version {:#04x} is not a {} address version",
                version, network
            )))
        }
    }
}
