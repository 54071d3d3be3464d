//! Bit-string to integer decoding.
//!
//! Backends report outcomes as strings of `'0'`/`'1'`, one character per
//! classical bit with classical bit 0 rightmost. How those characters map
//! onto the bits of a sample is a configurable contract:
//!
//! | Order | `"110"` | Leftmost character |
//! |-------|---------|--------------------|
//! | [`BitOrder::MsbFirst`] | 6 | most significant bit |
//! | [`BitOrder::LsbFirst`] | 3 | least significant bit |
//!
//! With `MsbFirst` and the HAL convention, qubit `i` lands in bit `i` of the
//! sample.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QrngError, QrngResult};

/// How a bit-string key maps to an unsigned integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BitOrder {
    /// Leftmost character is the most significant bit (big-endian).
    #[default]
    MsbFirst,
    /// Leftmost character is the least significant bit.
    LsbFirst,
}

impl BitOrder {
    /// Decode a `bit_width`-character key.
    ///
    /// Rejects keys of the wrong length and any character other than
    /// `'0'` or `'1'`.
    pub fn decode(self, bitstring: &str, bit_width: u32) -> QrngResult<u64> {
        let invalid = |reason: String| QrngError::InvalidBitstring {
            bitstring: bitstring.to_string(),
            reason,
        };

        if bitstring.len() != bit_width as usize {
            return Err(invalid(format!(
                "expected {bit_width} characters, got {}",
                bitstring.len()
            )));
        }
        if bit_width > u64::BITS {
            return Err(invalid(format!("more than {} bits", u64::BITS)));
        }

        let mut value = 0u64;
        for (pos, byte) in bitstring.bytes().enumerate() {
            let bit = match byte {
                b'0' => 0,
                b'1' => 1,
                other => {
                    return Err(invalid(format!(
                        "unexpected character '{}' at position {pos}",
                        char::from(other)
                    )));
                }
            };
            let shift = match self {
                BitOrder::MsbFirst => bit_width as usize - 1 - pos,
                BitOrder::LsbFirst => pos,
            };
            value |= bit << shift;
        }
        Ok(value)
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            BitOrder::MsbFirst => "msb-first",
            BitOrder::LsbFirst => "lsb-first",
        }
    }
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitOrder {
    type Err = QrngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "msb-first" | "msb" | "big-endian" => Ok(BitOrder::MsbFirst),
            "lsb-first" | "lsb" | "little-endian" => Ok(BitOrder::LsbFirst),
            other => Err(QrngError::InvalidArgument(format!(
                "unknown bit order '{other}' (expected msb-first or lsb-first)"
            ))),
        }
    }
}
