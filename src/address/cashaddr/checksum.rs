//! The cashaddr BCH checksum.
//!
//! Cashaddr shares its 5-bit alphabet with bech32 but not its checksum: the code here is a
//! degree-8 BCH code over GF(32) producing 40 bits (8 characters), and the prefix is mixed in
//! using only the low 5 bits of each character.
//!
//! Format: https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md

use bech32::Fe32;

/// Number of trailing checksum symbols in every cashaddr string.
pub const CHECKSUM_LENGTH: usize = 8;

/// Generator constants, one per bit of the 5 bits shifted out of the state on every step.
const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Compute the cashaddr polymod over a sequence of 5-bit values.
///
/// The state is 40 bits wide. For each input value the top 5 bits of the state are shifted
/// out, the value is shifted in, and the generators selected by the shifted-out bits are
/// XORed back in. The state starts at `1` and the result is XORed with `1`, so a valid
/// prefix + payload + checksum sequence evaluates to `0`.
pub fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);

        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= generator;
            }
        }
    }

    c ^ 1
}

/// Expand the prefix for checksum calculation: the low 5 bits of each character followed by
/// a zero separator.
pub fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(prefix.len() + 1);
    result.extend(prefix.bytes().map(|b| b & 0x1f));
    result.push(0);
    result
}

/// Compute the 8 checksum symbols for `data` under `prefix`, most significant symbol first.
pub fn create_checksum(prefix: &str, data: &[Fe32]) -> [Fe32; CHECKSUM_LENGTH] {
    let mut values = expand_prefix(prefix);
    values.extend(data.iter().map(|fe| fe.to_u8()));
    values.extend_from_slice(&[0; CHECKSUM_LENGTH]);

    let checksum = polymod(&values);

    let mut result = [Fe32::Q; CHECKSUM_LENGTH];
    for (i, slot) in result.iter_mut().enumerate() {
        let shift = 5 * (CHECKSUM_LENGTH - 1 - i);
        *slot = super::convert::fe(((checksum >> shift) & 0x1f) as u8);
    }
    result
}

/// Verify that `data_with_checksum` (payload symbols followed by the 8 checksum symbols)
/// carries a valid checksum for `prefix`.
pub fn verify_checksum(prefix: &str, data_with_checksum: &[Fe32]) -> bool {
    let mut values = expand_prefix(prefix);
    values.extend(data_with_checksum.iter().map(|fe| fe.to_u8()));
    polymod(&values) == 0
}
