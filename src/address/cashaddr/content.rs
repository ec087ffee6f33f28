//! Interpretation of a cashaddr payload as a typed hash.
//!
//! The first payload byte is the version byte:
//!
//! ```text
//!   bit 7     reserved, must be zero
//!   bits 6-3  address type (0 = P2PKH, 1 = P2SH)
//!   bits 2-0  size class, an index into SIZE_TABLE
//! ```
//!
//! Viewed as 5-bit symbols the reserved bit is bit 4 (`0x10`) of the first symbol, which
//! also holds the top three type bits. It has to be checked on the raw byte: extracting the
//! type with a 4-bit mask silently drops it.

use super::{decode, encode, Error, Result};
use crate::networks::Network;

/// Hash byte length for each size class.
pub const SIZE_TABLE: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

const RESERVED_BIT: u8 = 0x80;
const TYPE_MASK: u8 = 0x0f;
const SIZE_MASK: u8 = 0x07;

/// The 4-bit type field of a version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrType(u8);

impl AddrType {
    pub const PUB_KEY_HASH: AddrType = AddrType(0);
    pub const SCRIPT_HASH: AddrType = AddrType(1);

    /// Create a type from its numeric value. Returns `None` above 15.
    pub const fn new(value: u8) -> Option<AddrType> {
        if value <= TYPE_MASK {
            Some(AddrType(value))
        } else {
            None
        }
    }

    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

/// A successfully decoded cashaddr: the version byte type and the hash it labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrContent {
    pub addr_type: AddrType,
    pub hash: Vec<u8>,
}

fn size_class(hash_len: usize) -> Option<u8> {
    SIZE_TABLE
        .iter()
        .position(|&len| len == hash_len)
        .map(|class| class as u8)
}

/// Prepend the version byte for `addr_type` and the size class of `hash`.
///
/// # Panics
///
/// Panics if `hash.len()` is not in [`SIZE_TABLE`]. Hashes passed here are produced by the
/// caller, so an unsupported length is a bug rather than bad input.
pub fn pack_addr_data(hash: &[u8], addr_type: AddrType) -> Vec<u8> {
    let class = size_class(hash.len())
        .unwrap_or_else(|| panic!("invalid cashaddr hash length: {}", hash.len()));

    let mut data = Vec::with_capacity(hash.len() + 1);
    data.push((addr_type.0 << 3) | class);
    data.extend_from_slice(hash);
    data
}

/// Encode `content` as a cashaddr string under `prefix`.
///
/// # Panics
///
/// Panics if the hash length is not in [`SIZE_TABLE`], see [`pack_addr_data`].
pub fn encode_content(content: &AddrContent, prefix: &str) -> Result<String> {
    encode(prefix, &pack_addr_data(&content.hash, content.addr_type))
}

/// Split a checksum-verified payload into its type and hash.
pub fn parse_content(payload: &[u8]) -> Result<AddrContent> {
    let (&version, hash) = payload.split_first().ok_or(Error::EmptyContent)?;

    if version & RESERVED_BIT != 0 {
        return Err(Error::ReservedVersionBit(version));
    }

    let expected = SIZE_TABLE[usize::from(version & SIZE_MASK)];
    if hash.len() != expected {
        return Err(Error::InvalidHashLength {
            expected,
            got: hash.len(),
        });
    }

    Ok(AddrContent {
        addr_type: AddrType((version >> 3) & TYPE_MASK),
        hash: hash.to_vec(),
    })
}

/// Decode a cashaddr string for `network`.
///
/// The prefix may be omitted from `address`, in which case the network prefix is assumed.
/// An explicit prefix must match the network's.
pub fn decode_content(address: &str, network: Network) -> Result<AddrContent> {
    let expected = network.params().cash_addr_prefix;
    let (prefix, payload) = decode(address, expected)?;
    if prefix != expected {
        return Err(Error::PrefixMismatch {
            expected: expected.to_string(),
            got: prefix,
        });
    }
    parse_content(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::cashaddr::convert::fe;
    use crate::address::cashaddr::{encode, encode_raw};
    use bech32::Fe32;

    const MAINNET_PREFIX: &str = "bitcoincash";

    fn zeros(n: usize) -> Vec<Fe32> {
        vec![Fe32::Q; n]
    }

    #[test]
    fn test_pack_addr_data_version_byte() {
        for (class, &len) in SIZE_TABLE.iter().enumerate() {
            let hash = vec![0xab; len];
            let packed = pack_addr_data(&hash, AddrType::SCRIPT_HASH);
            assert_eq!(packed[0], 0x08 | class as u8);
            assert_eq!(&packed[1..], &hash[..]);
        }
    }

    #[test]
    fn test_pack_addr_data_size_in_second_symbol() {
        // after repacking to 5 bits the size class sits in the second symbol, shifted by 2
        for (class, &len) in SIZE_TABLE.iter().enumerate() {
            let packed = pack_addr_data(&vec![0; len], AddrType::PUB_KEY_HASH);
            let fes = crate::address::cashaddr::convert::bytes_to_fes(&packed);
            assert_eq!(usize::from(fes[1].to_u8() >> 2), class);
        }
    }

    #[test]
    fn test_pack_addr_data_rejects_bad_lengths() {
        for &len in SIZE_TABLE.iter() {
            let result = std::panic::catch_unwind(|| {
                pack_addr_data(&vec![0; len - 1], AddrType::PUB_KEY_HASH)
            });
            assert!(result.is_err(), "length {} should panic", len - 1);
        }
    }

    #[test]
    fn test_encode_decode_all_sizes() {
        for &len in SIZE_TABLE.iter() {
            let hash: Vec<u8> = (0..len).map(|i| (i * 13 + 7) as u8).collect();
            let content = AddrContent {
                addr_type: AddrType::PUB_KEY_HASH,
                hash,
            };
            let address = encode_content(&content, MAINNET_PREFIX).unwrap();
            let decoded = decode_content(&address, Network::BitcoinCash).unwrap();
            assert_eq!(decoded, content);
        }
    }

    #[test]
    fn test_type_extraction() {
        for t in 0..16u8 {
            let mut data = zeros(34);
            data[0] = fe(t);
            let address = encode_raw(MAINNET_PREFIX, &data).unwrap();
            let content = decode_content(&address, Network::BitcoinCash).unwrap();
            assert_eq!(content.addr_type.to_u8(), t);
            assert_eq!(content.hash.len(), 20);

            // the reserved bit is the top bit of the first symbol
            data[0] = fe(t | 0x10);
            let address = encode_raw(MAINNET_PREFIX, &data).unwrap();
            assert_eq!(
                decode_content(&address, Network::BitcoinCash),
                Err(Error::ReservedVersionBit((t | 0x10) << 3))
            );
        }
    }

    #[test]
    fn test_type_and_size_extraction_on_bytes() {
        for (class, &len) in SIZE_TABLE.iter().enumerate() {
            for t in 0..16u8 {
                let mut payload = vec![0u8; len + 1];
                payload[0] = (t << 3) | class as u8;
                let address = encode(MAINNET_PREFIX, &payload).unwrap();
                let content = decode_content(&address, Network::BitcoinCash).unwrap();
                assert_eq!(content.addr_type, AddrType::new(t).unwrap());
                assert_eq!(content.hash.len(), len);

                payload[0] |= RESERVED_BIT;
                let address = encode(MAINNET_PREFIX, &payload).unwrap();
                assert!(decode_content(&address, Network::BitcoinCash).is_err());
            }
        }
    }

    #[test]
    fn test_size_check() {
        for (class, &len) in SIZE_TABLE.iter().enumerate() {
            // 5-bit symbols needed for the version byte and hash
            let expected_size = (8 * (1 + len) + 4) / 5;

            let mut data = zeros(expected_size);
            data[1] = fe((class as u8) << 2);
            let address = encode_raw(MAINNET_PREFIX, &data).unwrap();
            let content = decode_content(&address, Network::BitcoinCash).unwrap();
            assert_eq!(content.addr_type, AddrType::PUB_KEY_HASH);
            assert_eq!(content.hash.len(), len);

            let mut data = zeros(expected_size + 1);
            data[1] = fe((class as u8) << 2);
            let address = encode_raw(MAINNET_PREFIX, &data).unwrap();
            assert!(decode_content(&address, Network::BitcoinCash).is_err());

            data.truncate(data.len() - 2);
            let address = encode_raw(MAINNET_PREFIX, &data).unwrap();
            assert!(decode_content(&address, Network::BitcoinCash).is_err());
        }
    }

    #[test]
    fn test_length_boundaries_on_bytes() {
        for (class, &len) in SIZE_TABLE.iter().enumerate() {
            for hash_len in [len + 1, len - 2] {
                let mut payload = vec![0u8; hash_len + 1];
                payload[0] = class as u8;
                let address = encode(MAINNET_PREFIX, &payload).unwrap();
                assert_eq!(
                    decode_content(&address, Network::BitcoinCash),
                    Err(Error::InvalidHashLength {
                        expected: len,
                        got: hash_len
                    })
                );
            }
        }
    }

    #[test]
    fn test_empty_payload() {
        let address = encode(MAINNET_PREFIX, &[]).unwrap();
        assert_eq!(
            decode_content(&address, Network::BitcoinCash),
            Err(Error::EmptyContent)
        );
    }

    #[test]
    fn test_invalid_on_wrong_network() {
        let mut hash = vec![0u8; 20];
        hash[..3].copy_from_slice(&[0xc0, 0xff, 0xee]);
        let content = AddrContent {
            addr_type: AddrType::PUB_KEY_HASH,
            hash,
        };

        for &network in Network::ALL {
            let address = encode_content(&content, network.params().cash_addr_prefix).unwrap();
            assert_eq!(decode_content(&address, network).unwrap(), content);

            for &other in Network::ALL {
                if other == network {
                    continue;
                }
                assert!(
                    decode_content(&address, other).is_err(),
                    "{} address accepted on {}",
                    network,
                    other
                );
            }
        }
    }

    #[test]
    fn test_prefix_is_optional() {
        let content = decode_content(
            "qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2",
            Network::BitcoinCash,
        )
        .unwrap();
        assert_eq!(content.addr_type, AddrType::PUB_KEY_HASH);
        assert_eq!(
            hex::encode(content.hash),
            "f5bf48b397dae70be82b3cca4793f8eb2b6cdac9"
        );

        // without a prefix the network prefix is mixed into the checksum
        assert!(decode_content(
            "qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2",
            Network::BitcoinCashTestnet
        )
        .is_err());
    }
}
