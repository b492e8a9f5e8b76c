//! Conformance and diagnostic harness for the skibidi phrase engine.
//!
//! This crate provides:
//! - Distribution sampling: observed vs expected decision rates with a
//!   multi-sigma pass/fail per metric
//! - Fingerprints: SHA-256 over a seeded phrase stream, per tier
//! - Structured logging: JSONL records for every harness run
//! - Seed and tier argument parsing shared by the CLI and tests

#![forbid(unsafe_code)]

pub mod distribution;
pub mod error;
pub mod fingerprint;
pub mod structured_log;

pub use distribution::{DistributionReport, Metric};
pub use error::HarnessError;
pub use fingerprint::{Fingerprint, Stream, fingerprint, fingerprint_all_tiers};

use skibidi_core::Tier;

/// Parse a seed given in decimal or `0x` hex, with optional `_` separators.
pub fn parse_seed(text: &str) -> Result<u64, HarnessError> {
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse::<u64>(),
    };
    parsed.map_err(|_| HarnessError::InvalidSeed(text.to_string()))
}

/// Parse a tier name (`scalar`, `vector256`, `vector512` or an ISA alias).
pub fn parse_tier(text: &str) -> Result<Tier, HarnessError> {
    Tier::from_name(text).ok_or_else(|| HarnessError::UnknownTier(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_parse_in_both_radixes() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed("0xDEAD_BEEF").unwrap(), 0xDEAD_BEEF);
        assert_eq!(parse_seed(" 0X10 ").unwrap(), 16);
        assert!(matches!(parse_seed("nope"), Err(HarnessError::InvalidSeed(_))));
    }

    #[test]
    fn tiers_parse_by_name_and_alias() {
        assert_eq!(parse_tier("scalar").unwrap(), Tier::Scalar);
        assert_eq!(parse_tier("AVX2").unwrap(), Tier::Vector256);
        assert!(matches!(parse_tier("sse9"), Err(HarnessError::UnknownTier(_))));
    }
}
