//! Run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bit_order::BitOrder;
use crate::error::{QrngError, QrngResult};

/// Default bit width per sample.
pub const DEFAULT_BITS: u32 = 16;
/// Default number of samples.
pub const DEFAULT_SHOTS: u32 = 1024;
/// Default output directory.
pub const DEFAULT_OUT: &str = "results";
/// Widest sample that fits in a `u64`.
pub const MAX_BITS: u32 = u64::BITS;

/// Parameters of a single QRNG run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Random bits per sample.
    pub bits: u32,
    /// Number of samples.
    pub shots: u32,
    /// Directory receiving the artifacts.
    pub out: PathBuf,
    /// Bit-string decoding.
    pub bit_order: BitOrder,
    /// Simulator seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            shots: DEFAULT_SHOTS,
            out: PathBuf::from(DEFAULT_OUT),
            bit_order: BitOrder::default(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Check the parameters a sampler will accept.
    pub fn validate(&self) -> QrngResult<()> {
        validate_bit_width(self.bits)?;
        validate_shots(self.shots)
    }
}

pub(crate) fn validate_bit_width(bits: u32) -> QrngResult<()> {
    if bits == 0 || bits > MAX_BITS {
        return Err(QrngError::InvalidArgument(format!(
            "bit width must be between 1 and {MAX_BITS}, got {bits}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_shots(shots: u32) -> QrngResult<()> {
    if shots == 0 {
        return Err(QrngError::InvalidArgument(
            "shot count must be at least 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.bits, 16);
        assert_eq!(config.shots, 1024);
        assert_eq!(config.out, PathBuf::from("results"));
        assert_eq!(config.bit_order, BitOrder::MsbFirst);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        let mut config = RunConfig {
            bits: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());

        config.bits = 65;
        assert!(config.validate().is_err());

        config.bits = 64;
        assert!(config.validate().is_ok());

        config.shots = 0;
        assert!(matches!(
            config.validate(),
            Err(QrngError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"bits": 8, "bit_order": "lsb-first"}"#).unwrap();
        assert_eq!(config.bits, 8);
        assert_eq!(config.shots, DEFAULT_SHOTS);
        assert_eq!(config.bit_order, BitOrder::LsbFirst);
    }
}
