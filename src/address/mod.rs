//! Address encoding and decoding for Bitcoin Cash and eCash.
//!
//! # Supported Address Formats
//!
//! - **Cashaddr**: `prefix:payload` with a 40-bit BCH checksum, see [`cashaddr`]
//! - **Base58Check**: legacy P2PKH and P2SH addresses, see [`base58check`]
//!
//! Addresses are P2PKH, P2SH, or a bare public key (which is shown as its P2PKH address
//! when encoded).
//!
//! # Examples
//!
//! ```rust
//! use wasm_cashaddr::address::{decode_address, AddressFormat};
//! use wasm_cashaddr::Network;
//!
//! let addr = decode_address(
//!     "bitcoincash:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2",
//!     Network::BitcoinCash,
//! )
//! .unwrap();
//! assert_eq!(
//!     addr.encode_address(AddressFormat::Legacy).unwrap(),
//!     "1PQPheJQSauxRPTxzNMUco1XmoCyPoEJCp"
//! );
//! ```

pub mod base58check;
pub mod cashaddr;
pub mod networks;
mod types;

pub use base58check::Base58CheckCodec;
pub use cashaddr::CashAddrCodec;
pub use networks::{
    from_output_script_with_coin, from_output_script_with_network, to_output_script_with_coin,
    to_output_script_with_network, AddressFormat,
};
pub use types::{decode_address, Address, PubKeyFormat};

use crate::bitcoin::{Script, ScriptBuf};
use std::fmt;

#[derive(Debug)]
pub enum AddressError {
    InvalidAddress(String),
    InvalidPublicKey(String),
    UnsupportedScriptType(String),
    /// A cashaddr type other than P2PKH (0) or P2SH (1).
    UnsupportedAddressType(u8),
    /// Both legacy version bytes of the network are the same.
    AddressCollision,
    Base58Error(String),
    CashaddrError(cashaddr::Error),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            AddressError::InvalidPublicKey(msg) => write!(f, "Invalid public key: {}", msg),
            AddressError::UnsupportedScriptType(msg) => {
                write!(f, "Unsupported script type: {}", msg)
            }
            AddressError::UnsupportedAddressType(t) => {
                write!(f, "Unsupported address type: {}", t)
            }
            AddressError::AddressCollision => {
                write!(f, "Address collision: ambiguous legacy version byte")
            }
            AddressError::Base58Error(msg) => write!(f, "Base58 error: {}", msg),
            AddressError::CashaddrError(e) => write!(f, "Cashaddr error: {}", e),
        }
    }
}

impl std::error::Error for AddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AddressError::CashaddrError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<cashaddr::Error> for AddressError {
    fn from(e: cashaddr::Error) -> Self {
        AddressError::CashaddrError(e)
    }
}

type Result<T> = std::result::Result<T, AddressError>;

/// Trait for address encoding and decoding
pub trait AddressCodec {
    fn encode(&self, script: &Script) -> Result<String>;
    fn decode(&self, address: &str) -> Result<ScriptBuf>;
}

/// Convert output script to address string (convenience wrapper)
pub fn from_output_script(script: &Script, codec: &dyn AddressCodec) -> Result<String> {
    codec.encode(script)
}

/// Convert address string to output script (convenience wrapper)
pub fn to_output_script(address: &str, codec: &dyn AddressCodec) -> Result<ScriptBuf> {
    codec.decode(address)
}

/// Try multiple codecs to decode an address
pub fn to_output_script_try_codecs(
    address: &str,
    codecs: &[&dyn AddressCodec],
) -> Result<ScriptBuf> {
    for &codec in codecs {
        match codec.decode(address) {
            Ok(script) => return Ok(script),
            Err(e) => tracing::trace!(%address, error = %e, "codec rejected address"),
        }
    }

    Err(AddressError::InvalidAddress(format!(
        "Could not decode address with any provided codec: {}",
        address
    )))
}
