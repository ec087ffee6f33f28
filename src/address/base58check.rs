//! Base58Check encoding/decoding for legacy P2PKH and P2SH addresses.

use super::{AddressCodec, AddressError, Result};
use crate::bitcoin::hashes::Hash;
use crate::bitcoin::{base58, PubkeyHash, Script, ScriptBuf, ScriptHash};
use crate::networks::Network;

/// Base58Check codec with network-specific version bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58CheckCodec {
    /// Base58Check P2PKH version byte
    pub pub_key_hash: u8,
    /// Base58Check P2SH version byte
    pub script_hash: u8,
}

impl Base58CheckCodec {
    /// Create a new Base58Check codec with specified version bytes
    pub const fn new(pub_key_hash: u8, script_hash: u8) -> Self {
        Self {
            pub_key_hash,
            script_hash,
        }
    }

    pub const fn for_network(network: Network) -> Self {
        let params = network.params();
        Self::new(params.legacy_pub_key_hash, params.legacy_script_hash)
    }
}

/// Encode a hash with a version byte to Base58Check
pub fn to_base58_check(hash: &[u8], version: u8) -> String {
    let mut data = Vec::with_capacity(hash.len() + 1);
    data.push(version);
    data.extend_from_slice(hash);

    // encode_check appends the double-SHA256 checksum
    base58::encode_check(&data)
}

/// Decode a Base58Check string to (version, hash)
pub fn from_base58_check(address: &str) -> Result<(u8, Vec<u8>)> {
    let payload =
        base58::decode_check(address).map_err(|e| AddressError::Base58Error(e.to_string()))?;

    match payload.split_first() {
        Some((&version, hash)) => Ok((version, hash.to_vec())),
        None => Err(AddressError::Base58Error("Empty payload".to_string())),
    }
}

impl AddressCodec for Base58CheckCodec {
    fn encode(&self, script: &Script) -> Result<String> {
        if script.is_p2pkh() {
            let hash = &script.as_bytes()[3..23];
            Ok(to_base58_check(hash, self.pub_key_hash))
        } else if script.is_p2sh() {
            let hash = &script.as_bytes()[2..22];
            Ok(to_base58_check(hash, self.script_hash))
        } else {
            Err(AddressError::UnsupportedScriptType(
                "Base58Check only supports P2PKH and P2SH".to_string(),
            ))
        }
    }

    fn decode(&self, address: &str) -> Result<ScriptBuf> {
        let (version, hash) = from_base58_check(address)?;

        let hash_array: [u8; 20] = hash.try_into().map_err(|hash: Vec<u8>| {
            AddressError::InvalidAddress(format!("Invalid hash length: {}", hash.len()))
        })?;

        if version == self.pub_key_hash {
            Ok(ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(
                hash_array,
            )))
        } else if version == self.script_hash {
            Ok(ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(
                hash_array,
            )))
        } else {
            Err(AddressError::InvalidAddress(format!(
                "Version mismatch: expected {} or {}, got {}",
                self.pub_key_hash, self.script_hash, version
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_addresses() {
        // (hash, version, legacy address)
        let cases = [
            (
                "76a04053bda0a88bda5177b86a15c3b29f559873",
                0x00,
                "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu",
            ),
            (
                "cb481232299cd5743151ac4b2d63ae198e7bb0a9",
                0x00,
                "1KXrWXciRDZUpQwQmuM1DbwsKDLYAYsVLR",
            ),
            (
                "76a04053bda0a88bda5177b86a15c3b29f559873",
                0x05,
                "3CWFddi6m4ndiGyKqzYvsFYagqDLPVMTzC",
            ),
            (
                "011f28e473c95f4013d7d53ec5fbc3b42df8ed10",
                0x05,
                "31nwvkZwyPdgzjBJZXfDmSWsC4ZLKpYyUw",
            ),
        ];

        for (hash_hex, version, expected) in cases {
            let hash = hex::decode(hash_hex).unwrap();
            assert_eq!(to_base58_check(&hash, version), expected);
            assert_eq!(from_base58_check(expected).unwrap(), (version, hash));
        }
    }

    #[test]
    fn test_bad_checksum() {
        let result = from_base58_check("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggv");
        assert!(matches!(result, Err(AddressError::Base58Error(_))));
    }

    #[test]
    fn test_codec_round_trip() {
        let codec = Base58CheckCodec::for_network(Network::BitcoinCashTestnet);
        let hash = hex::decode("cb481232299cd5743151ac4b2d63ae198e7bb0a9").unwrap();

        let script = ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(hash.try_into().unwrap()));
        let address = codec.encode(&script).unwrap();
        assert!(address.starts_with('2'));
        assert_eq!(codec.decode(&address).unwrap(), script);

        // a testnet address is not valid on mainnet
        let mainnet = Base58CheckCodec::for_network(Network::BitcoinCash);
        assert!(mainnet.decode(&address).is_err());
    }
}
