//! Cashaddr encoding/decoding for Bitcoin Cash and eCash.
//!
//! Implements the cashaddr format as defined in:
//! - Format: https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md
//! - Reference implementation: https://github.com/Bitcoin-ABC/bitcoin-abc/blob/master/src/cashaddr.cpp
//!
//! A cashaddr is `prefix:payload` where the payload is a string of 5-bit symbols drawn from
//! the bech32 alphabet, the last 8 of which are a checksum that also covers the prefix.
//! The prefix may be left out when the network is known from context.
//!
//! The layers are:
//! - [`checksum`]: the polymod checksum over 5-bit values
//! - [`convert`]: 8-bit <-> 5-bit repacking with strict padding rules
//! - this module: the text form, at the symbol level ([`encode_raw`], [`decode_raw`]) and the
//!   byte level ([`encode`], [`decode`])
//! - [`content`]: the version byte and the typed hash it introduces
//!
//! # CashAddr vs Bech32
//!
//! | Feature | Bech32/Bech32m | CashAddr |
//! |---------|----------------|----------|
//! | **Separator** | `1` | `:` (optional) |
//! | **Checksum Length** | 6 characters (30 bits) | 8 characters (40 bits) |
//! | **Prefix Expansion** | `[b>>5...] + [0] + [b&31...]` | `[b&31...] + [0]` |
//! | **Version Encoding** | First char = witness version | First byte = type + size |
//! | **Padding Validation** | Lenient | Strict (must be zero) |
//!
//! Only `Fe32` is shared with the bech32 crate: the alphabet is the same, everything else
//! is cashaddr specific.

pub mod checksum;
pub mod content;
pub mod convert;

pub use content::{decode_content, encode_content, pack_addr_data, AddrContent, AddrType};

use super::{AddressCodec, AddressError};
use crate::bitcoin::hashes::Hash;
use crate::bitcoin::{PubkeyHash, Script, ScriptBuf, ScriptHash};
use bech32::Fe32;
use checksum::{create_checksum, verify_checksum, CHECKSUM_LENGTH};
use convert::{bytes_to_fes, fes_to_bytes};
use std::fmt;

/// Separator between prefix and payload.
pub const SEPARATOR: char = ':';

/// Reasons a cashaddr string or payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No prefix was given and none could be parsed.
    EmptyPrefix,
    /// Nothing follows the separator.
    EmptyPayload,
    MultipleSeparators,
    /// The prefix contains something other than ASCII letters.
    InvalidPrefixChar(char),
    /// The character is not in the cashaddr alphabet.
    InvalidChar(char),
    /// The string mixes upper and lower case letters.
    MixedCase,
    /// Fewer symbols than the checksum needs.
    TooShort(usize),
    InvalidChecksum,
    /// Leftover bits after repacking to bytes are too many or not zero.
    InvalidPadding,
    /// The payload has no version byte.
    EmptyContent,
    ReservedVersionBit(u8),
    InvalidHashLength { expected: usize, got: usize },
    PrefixMismatch { expected: String, got: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyPrefix => write!(f, "Empty prefix"),
            Error::EmptyPayload => write!(f, "Empty payload"),
            Error::MultipleSeparators => write!(f, "Multiple separators"),
            Error::InvalidPrefixChar(c) => write!(f, "Invalid prefix character: {:?}", c),
            Error::InvalidChar(c) => write!(f, "Invalid character: {:?}", c),
            Error::MixedCase => write!(f, "Mixed case address"),
            Error::TooShort(len) => write!(
                f,
                "Payload too short: {} symbols, at least {} required",
                len, CHECKSUM_LENGTH
            ),
            Error::InvalidChecksum => write!(f, "Invalid checksum"),
            Error::InvalidPadding => write!(f, "Invalid bit conversion"),
            Error::EmptyContent => write!(f, "Empty payload content"),
            Error::ReservedVersionBit(version) => {
                write!(f, "Reserved bit set in version byte: {:#04x}", version)
            }
            Error::InvalidHashLength { expected, got } => write!(
                f,
                "Invalid hash length: expected {} bytes, got {}",
                expected, got
            ),
            Error::PrefixMismatch { expected, got } => {
                write!(f, "Prefix mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

fn check_prefix(prefix: &str) -> Result<String> {
    if prefix.is_empty() {
        return Err(Error::EmptyPrefix);
    }
    if let Some(c) = prefix.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(Error::InvalidPrefixChar(c));
    }
    Ok(prefix.to_ascii_lowercase())
}

/// Encode 5-bit `data` under `prefix`, appending the checksum.
///
/// The prefix is lowercased; it must be non-empty and made of ASCII letters.
pub fn encode_raw(prefix: &str, data: &[Fe32]) -> Result<String> {
    let prefix = check_prefix(prefix)?;
    let checksum = create_checksum(&prefix, data);

    let mut result = String::with_capacity(prefix.len() + 1 + data.len() + CHECKSUM_LENGTH);
    result.push_str(&prefix);
    result.push(SEPARATOR);
    result.extend(data.iter().chain(checksum.iter()).map(|fe| fe.to_char()));
    Ok(result)
}

/// Encode `payload` bytes under `prefix`.
pub fn encode(prefix: &str, payload: &[u8]) -> Result<String> {
    encode_raw(prefix, &bytes_to_fes(payload))
}

/// Decode a cashaddr string to its lowercase prefix and 5-bit data, checksum removed.
///
/// `default_prefix` is used when `address` has no `prefix:` part. Upper case input is
/// accepted, mixed case is not.
pub fn decode_raw(address: &str, default_prefix: &str) -> Result<(String, Vec<Fe32>)> {
    let mut lower = false;
    let mut upper = false;
    let mut digit = None;
    let mut separator = None;

    for (i, c) in address.char_indices() {
        match c {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => {
                digit.get_or_insert(c);
            }
            SEPARATOR => {
                if separator.is_some() {
                    return Err(Error::MultipleSeparators);
                }
                if i == 0 {
                    return Err(Error::EmptyPrefix);
                }
                // digits are allowed in the payload but not in the prefix
                if let Some(d) = digit {
                    return Err(Error::InvalidPrefixChar(d));
                }
                separator = Some(i);
            }
            _ => return Err(Error::InvalidChar(c)),
        }
    }

    if lower && upper {
        return Err(Error::MixedCase);
    }

    let (prefix, payload) = match separator {
        Some(i) => (
            address[..i].to_ascii_lowercase(),
            &address[i + SEPARATOR.len_utf8()..],
        ),
        None => (default_prefix.to_ascii_lowercase(), address),
    };

    if prefix.is_empty() {
        return Err(Error::EmptyPrefix);
    }
    if payload.is_empty() {
        return Err(Error::EmptyPayload);
    }

    let mut data = payload
        .chars()
        .map(|c| Fe32::from_char(c.to_ascii_lowercase()).map_err(|_| Error::InvalidChar(c)))
        .collect::<Result<Vec<_>>>()?;

    if data.len() < CHECKSUM_LENGTH {
        return Err(Error::TooShort(data.len()));
    }

    if !verify_checksum(&prefix, &data) {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(data.len() - CHECKSUM_LENGTH);
    Ok((prefix, data))
}

/// Decode a cashaddr string to its lowercase prefix and payload bytes.
///
/// On top of [`decode_raw`] the payload must repack to whole bytes with zero padding.
pub fn decode(address: &str, default_prefix: &str) -> Result<(String, Vec<u8>)> {
    let (prefix, data) = decode_raw(address, default_prefix)?;
    let payload = fes_to_bytes(&data)?;
    Ok((prefix, payload))
}

/// CashAddr codec for P2PKH and P2SH output scripts on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashAddrCodec {
    /// Cashaddr prefix (e.g., "bitcoincash", "ecash")
    pub prefix: &'static str,
}

impl CashAddrCodec {
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Encode a hash with the given type.
    pub fn encode_hash(&self, hash: &[u8], addr_type: AddrType) -> Result<String> {
        encode(self.prefix, &pack_addr_data(hash, addr_type))
    }

    /// Decode an address of this codec's prefix.
    pub fn decode_content(&self, address: &str) -> Result<AddrContent> {
        let (prefix, payload) = decode(address, self.prefix)?;
        if prefix != self.prefix {
            return Err(Error::PrefixMismatch {
                expected: self.prefix.to_string(),
                got: prefix,
            });
        }
        content::parse_content(&payload)
    }
}

impl AddressCodec for CashAddrCodec {
    fn encode(&self, script: &Script) -> std::result::Result<String, AddressError> {
        if script.is_p2pkh() {
            let hash = &script.as_bytes()[3..23];
            Ok(self.encode_hash(hash, AddrType::PUB_KEY_HASH)?)
        } else if script.is_p2sh() {
            let hash = &script.as_bytes()[2..22];
            Ok(self.encode_hash(hash, AddrType::SCRIPT_HASH)?)
        } else {
            Err(AddressError::UnsupportedScriptType(
                "CashAddr only supports P2PKH and P2SH".to_string(),
            ))
        }
    }

    fn decode(&self, address: &str) -> std::result::Result<ScriptBuf, AddressError> {
        let content = self.decode_content(address)?;

        let hash_array: [u8; 20] = content.hash.try_into().map_err(|hash: Vec<u8>| {
            AddressError::InvalidAddress(format!("Unsupported hash length: {}", hash.len()))
        })?;

        match content.addr_type {
            AddrType::PUB_KEY_HASH => Ok(ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(
                hash_array,
            ))),
            AddrType::SCRIPT_HASH => Ok(ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(
                hash_array,
            ))),
            other => Err(AddressError::UnsupportedAddressType(other.to_u8())),
        }
    }
}
