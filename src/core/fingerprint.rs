//! The fingerprint value produced by the block hash engine.
//!
//! Bits are packed most-significant first. When the bit length is not a
//! multiple of 8 the trailing bits of the last byte are always zero, so
//! byte-wise comparison and hex encoding never see stray padding.

use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered, fixed-length bit sequence in row-major block order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "FingerprintRepr", try_from = "FingerprintRepr")]
pub struct Fingerprint {
    bytes: Vec<u8>,
    len: usize,
}

impl Fingerprint {
    /// Pack a sequence of bits
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut bytes = Vec::new();
        let mut len = 0;

        for bit in bits {
            if len % 8 == 0 {
                bytes.push(0);
            }
            if bit {
                if let Some(last) = bytes.last_mut() {
                    *last |= 1 << (7 - len % 8);
                }
            }
            len += 1;
        }

        Self { bytes, len }
    }

    /// Parse canonical hex for a fingerprint of `bit_len` bits.
    ///
    /// Accepts either case. Padding bits in the final digit are dropped.
    pub fn from_hex(hex: &str, bit_len: usize) -> Result<Self, FingerprintError> {
        let expected = bit_len.div_ceil(4);
        let digits = hex.chars().count();
        if digits != expected {
            return Err(FingerprintError::HexLength {
                expected,
                actual: digits,
            });
        }

        let mut nibbles = Vec::with_capacity(expected);
        for (position, found) in hex.chars().enumerate() {
            let value = found
                .to_digit(16)
                .ok_or(FingerprintError::InvalidHexDigit { position, found })?;
            nibbles.push(value as u8);
        }

        let bits = (0..bit_len).map(|i| nibbles[i / 4] & (0b1000 >> (i % 4)) != 0);
        Ok(Self::from_bits(bits))
    }

    /// Parse hex produced from a `bits x bits` block grid
    pub fn from_hex_for_grid(hex: &str, bits: u32) -> Result<Self, FingerprintError> {
        Self::from_hex(hex, bits as usize * bits as usize)
    }

    /// Lowercase hex, four bits per digit, `ceil(len / 4)` digits
    pub fn to_hex(&self) -> String {
        let mut hex: String = self.bytes.iter().map(|b| format!("{:02x}", b)).collect();
        hex.truncate(self.len.div_ceil(4));
        hex
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, or `None` past the end
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Iterate over all bits in order
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(move |i| self.bit(i))
    }

    /// Packed bytes, most-significant bit first, zero-padded
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Parse hex assuming every digit carries four meaningful bits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s, s.chars().count() * 4)
    }
}

/// Serialized form: bit length plus canonical hex
#[derive(Serialize, Deserialize)]
struct FingerprintRepr {
    bits: usize,
    hex: String,
}

impl From<Fingerprint> for FingerprintRepr {
    fn from(fingerprint: Fingerprint) -> Self {
        Self {
            hex: fingerprint.to_hex(),
            bits: fingerprint.len,
        }
    }
}

impl TryFrom<FingerprintRepr> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(repr: FingerprintRepr) -> Result<Self, Self::Error> {
        Fingerprint::from_hex(&repr.hex, repr.bits)
    }
}
