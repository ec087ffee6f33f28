//! Bit repacking between 8-bit bytes and 5-bit field elements.
//!
//! This is similar to bech32's `ByteIterExt::bytes_to_fes()` and `Fe32IterExt::fes_to_bytes()`,
//! but cashaddr is strict about padding: when repacking 5-bit values back to bytes, any
//! leftover bits must be fewer than 5 and all zero. Otherwise two different strings could
//! decode to the same bytes.

use super::{Error, Result};
use bech32::Fe32;

/// Build a field element from the low 5 bits of `value`.
pub(crate) fn fe(value: u8) -> Fe32 {
    Fe32::try_from(value & 0x1f).expect("value is masked to 5 bits")
}

/// Convert 8-bit bytes to 5-bit field elements.
///
/// Bits are consumed most significant first. If the total bit count is not a multiple of 5
/// the final element is padded on the right with zero bits, so the output has
/// `ceil(8 * data.len() / 5)` elements.
///
/// # Example
/// Input: `[0xFF, 0x01]` (16 bits)
/// - First 5 bits: 11111 = 31
/// - Next 5 bits: 11100 = 28
/// - Next 5 bits: 00000 = 0
/// - Remaining 1 bit (1) padded: 10000 = 16
pub fn bytes_to_fes(data: &[u8]) -> Vec<Fe32> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity((data.len() * 8).div_ceil(5));

    for &byte in data {
        acc = ((acc << 8) | u32::from(byte)) & 0xfff;
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            result.push(fe((acc >> bits) as u8));
        }
    }

    if bits > 0 {
        result.push(fe((acc << (5 - bits)) as u8));
    }

    result
}

/// Convert 5-bit field elements to 8-bit bytes.
///
/// Fails with [`Error::InvalidPadding`] if 5 or more bits are left over (a whole element
/// that carries no byte) or if any of the 1-4 leftover bits is set.
///
/// # Example
/// Valid: `[31, 28, 0, 16]` with last bits = 0000 (zero padding)
/// Invalid: `[31, 28, 0, 17]` with last bits = 0001 (non-zero padding)
pub fn fes_to_bytes(fes: &[Fe32]) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity(fes.len() * 5 / 8);

    for &fe in fes {
        acc = ((acc << 5) | u32::from(fe.to_u8())) & 0xfff;
        bits += 5;

        while bits >= 8 {
            bits -= 8;
            result.push((acc >> bits) as u8);
        }
    }

    if bits >= 5 || (acc & ((1 << bits) - 1)) != 0 {
        return Err(Error::InvalidPadding);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(fes: &[Fe32]) -> Vec<u8> {
        fes.iter().map(|fe| fe.to_u8()).collect()
    }

    fn fes(values: &[u8]) -> Vec<Fe32> {
        values.iter().map(|&v| fe(v)).collect()
    }

    #[test]
    fn test_bytes_to_fes_example() {
        assert_eq!(values(&bytes_to_fes(&[0xff, 0x01])), vec![31, 28, 0, 16]);
    }

    #[test]
    fn test_bytes_to_fes_lengths() {
        for n in 0..70usize {
            let data = vec![0xa5; n];
            assert_eq!(bytes_to_fes(&data).len(), (8 * n).div_ceil(5));
        }
    }

    #[test]
    fn test_fes_to_bytes_example() {
        assert_eq!(fes_to_bytes(&fes(&[31, 28, 0, 16])).unwrap(), vec![0xff, 0x01]);
    }

    #[test]
    fn test_non_zero_padding_rejected() {
        assert_eq!(
            fes_to_bytes(&fes(&[31, 28, 0, 17])),
            Err(Error::InvalidPadding)
        );
    }

    #[test]
    fn test_excess_padding_rejected() {
        // 3 elements carry 15 bits: one byte and 7 bits of "padding", which is too much
        assert_eq!(fes_to_bytes(&fes(&[0, 0, 0])), Err(Error::InvalidPadding));
        // a single element cannot make a byte
        assert_eq!(fes_to_bytes(&fes(&[0])), Err(Error::InvalidPadding));
    }

    #[test]
    fn test_empty() {
        assert!(bytes_to_fes(&[]).is_empty());
        assert_eq!(fes_to_bytes(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_round_trip_all_lengths() {
        for n in 0..70usize {
            let data: Vec<u8> = (0..n).map(|i| (i * 37 + 11) as u8).collect();
            assert_eq!(fes_to_bytes(&bytes_to_fes(&data)).unwrap(), data);
        }
    }
}
