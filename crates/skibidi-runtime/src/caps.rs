//! CPU capability probe.
//!
//! The probe only reports what the hardware can do. Whether the running build
//! can emit a given tier is decided by the strategy selector.

/// Bitmask of vector-instruction tiers supported by the CPU.
///
/// Bit assignments match the C header (`SKIBIDI_CAP_*`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities(u32);

impl Capabilities {
    /// 128-bit vectors (SSE2).
    pub const SSE2: u32 = 1 << 0;
    /// AVX.
    pub const AVX: u32 = 1 << 1;
    /// 256-bit integer vectors (AVX2).
    pub const AVX2: u32 = 1 << 2;
    /// AVX-512 foundation.
    pub const AVX512F: u32 = 1 << 3;
    /// AVX-512 vector length extensions.
    pub const AVX512VL: u32 = 1 << 4;
    /// AVX-512 byte/word.
    pub const AVX512BW: u32 = 1 << 5;
    /// AVX-512 doubleword/quadword.
    pub const AVX512DQ: u32 = 1 << 6;

    const KNOWN: u32 = (1 << 7) - 1;

    /// No capabilities at all (non-x86 hosts).
    pub const NONE: Self = Self(0);

    /// Build from raw bits; unknown bits are dropped.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::KNOWN)
    }

    /// Raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    /// True when the 256-bit tier can run on this CPU.
    #[must_use]
    pub const fn has_vector256(self) -> bool {
        self.contains(Self::AVX2)
    }

    /// True when the 512-bit tier can run on this CPU.
    #[must_use]
    pub const fn has_vector512(self) -> bool {
        self.contains(Self::AVX512F)
    }
}

/// Query the CPU for supported vector tiers.
///
/// The standard library caches CPUID results, so repeated calls are cheap, but
/// the strategy selector still calls this at most once per resolution.
#[cold]
#[must_use]
pub fn probe() -> Capabilities {
    #[cfg(target_arch = "x86_64")]
    {
        let mut bits = 0u32;
        if std::arch::is_x86_feature_detected!("sse2") {
            bits |= Capabilities::SSE2;
        }
        if std::arch::is_x86_feature_detected!("avx") {
            bits |= Capabilities::AVX;
        }
        if std::arch::is_x86_feature_detected!("avx2") {
            bits |= Capabilities::AVX2;
        }
        if std::arch::is_x86_feature_detected!("avx512f") {
            bits |= Capabilities::AVX512F;
        }
        if std::arch::is_x86_feature_detected!("avx512vl") {
            bits |= Capabilities::AVX512VL;
        }
        if std::arch::is_x86_feature_detected!("avx512bw") {
            bits |= Capabilities::AVX512BW;
        }
        if std::arch::is_x86_feature_detected!("avx512dq") {
            bits |= Capabilities::AVX512DQ;
        }
        Capabilities(bits)
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        Capabilities::NONE
    }
}
