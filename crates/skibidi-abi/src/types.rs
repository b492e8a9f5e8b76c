//! C-visible types, status codes and constants.

use std::ffi::c_int;

use skibidi_core::{Config, GenerateError};
use skibidi_runtime::Capabilities;

/// Opaque context as seen from C (`SkibidiContext`).
pub type SkibidiContext = skibidi_core::Context;

pub const SKIBIDI_OK: c_int = 0;
pub const SKIBIDI_ERR_NULL_PTR: c_int = -1;
pub const SKIBIDI_ERR_BUFFER_TOO_SMALL: c_int = -2;
pub const SKIBIDI_ERR_INVALID_CONFIG: c_int = -3;

pub const SKIBIDI_MIN_BUFFER_SIZE: usize = skibidi_core::MIN_BUFFER_SIZE;
pub const SKIBIDI_CACHE_LINE_SIZE: usize = 64;

pub const SKIBIDI_CAP_SSE2: u32 = Capabilities::SSE2;
pub const SKIBIDI_CAP_AVX: u32 = Capabilities::AVX;
pub const SKIBIDI_CAP_AVX2: u32 = Capabilities::AVX2;
pub const SKIBIDI_CAP_AVX512F: u32 = Capabilities::AVX512F;
pub const SKIBIDI_CAP_AVX512VL: u32 = Capabilities::AVX512VL;
pub const SKIBIDI_CAP_AVX512BW: u32 = Capabilities::AVX512BW;
pub const SKIBIDI_CAP_AVX512DQ: u32 = Capabilities::AVX512DQ;

const _: () = assert!(SKIBIDI_CACHE_LINE_SIZE == skibidi_core::context_alignment());

/// Strategy configuration as laid out in the C header.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkibidiConfig {
    /// Non-zero permits the 512-bit tier.
    pub enable_avx512: i32,
    /// Non-zero permits any vector tier.
    pub enable_simd_rng: i32,
    pub reserved: [i32; 6],
}

impl From<&SkibidiConfig> for Config {
    fn from(raw: &SkibidiConfig) -> Self {
        Config {
            allow_512: raw.enable_avx512 != 0,
            allow_vectorized_rng: raw.enable_simd_rng != 0,
        }
    }
}

impl From<Config> for SkibidiConfig {
    fn from(config: Config) -> Self {
        SkibidiConfig {
            enable_avx512: i32::from(config.allow_512),
            enable_simd_rng: i32::from(config.allow_vectorized_rng),
            reserved: [0; 6],
        }
    }
}

/// Status code for a core error.
#[must_use]
pub const fn status_of(err: GenerateError) -> c_int {
    match err {
        GenerateError::NullArgument => SKIBIDI_ERR_NULL_PTR,
        GenerateError::BufferTooSmall { .. } => SKIBIDI_ERR_BUFFER_TOO_SMALL,
        GenerateError::InvalidConfiguration => SKIBIDI_ERR_INVALID_CONFIG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_layout_is_eight_ints() {
        assert_eq!(core::mem::size_of::<SkibidiConfig>(), 32);
    }

    #[test]
    fn config_conversion_normalizes_flags() {
        let raw = SkibidiConfig {
            enable_avx512: 7,
            enable_simd_rng: 0,
            reserved: [1; 6],
        };
        let config = Config::from(&raw);
        assert!(config.allow_512);
        assert!(!config.allow_vectorized_rng);
        let back = SkibidiConfig::from(config);
        assert_eq!(back.enable_avx512, 1);
        assert_eq!(back.reserved, [0; 6]);
    }

    #[test]
    fn status_codes_are_distinct() {
        let codes = [
            status_of(GenerateError::NullArgument),
            status_of(GenerateError::BufferTooSmall {
                required: 64,
                actual: 0,
            }),
            status_of(GenerateError::InvalidConfiguration),
        ];
        assert_eq!(codes, [-1, -2, -3]);
    }
}
