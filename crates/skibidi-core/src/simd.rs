//! Vector kernels: batch canonical classification and wide canonical copies.
//!
//! Callers pass a tier that is already clamped to what the host can run
//! (`skibidi_runtime::host_ceiling`), which is what makes the
//! `target_feature` calls below sound.

use skibidi_runtime::Tier;

use crate::tables::{CANONICAL_PHRASE, CANONICAL_THRESHOLD, CANONICAL_WIDE};

/// Bit `i` set when lane `i` selects the canonical phrase.
#[inline(always)]
pub(crate) fn canonical_mask(draws: &[u64; 4], tier: Tier) -> u32 {
    match tier {
        Tier::Scalar => canonical_mask_scalar(draws),
        #[cfg(target_arch = "x86_64")]
        Tier::Vector256 | Tier::Vector512 => {
            // SAFETY: tier >= Vector256 implies the host reports AVX2.
            unsafe { x86::canonical_mask_avx2(draws) }
        }
        #[cfg(not(target_arch = "x86_64"))]
        _ => canonical_mask_scalar(draws),
    }
}

/// Four independent byte compares, one per lane.
#[inline(always)]
pub(crate) fn canonical_mask_scalar(draws: &[u64; 4]) -> u32 {
    let mut mask = 0u32;
    for (lane, &draw) in draws.iter().enumerate() {
        let check = ((draw >> 48) & 0xFF) as u32;
        mask |= u32::from(check < CANONICAL_THRESHOLD) << lane;
    }
    mask
}

/// Write the canonical phrase at the start of `out` with the widest store the
/// tier supports. Bytes past the phrase may be overwritten with padding.
///
/// `out` must hold at least 64 bytes.
#[inline(always)]
pub(crate) fn copy_canonical(out: &mut [u8], tier: Tier) -> usize {
    debug_assert!(out.len() >= CANONICAL_WIDE.0.len());
    #[cfg(target_arch = "x86_64")]
    {
        #[cfg(feature = "avx512")]
        if tier == Tier::Vector512 {
            if let Some(dst) = out.first_chunk_mut::<64>() {
                // SAFETY: Vector512 implies AVX-512F.
                unsafe { x86::copy64_avx512(dst, &CANONICAL_WIDE.0) };
                return CANONICAL_PHRASE.len();
            }
        }
        if tier >= Tier::Vector256 {
            if let Some(dst) = out.first_chunk_mut::<32>() {
                // SAFETY: Vector256 and above imply AVX2.
                unsafe { x86::copy32_avx2(dst, &CANONICAL_WIDE.0) };
                return CANONICAL_PHRASE.len();
            }
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = tier;
    out[..CANONICAL_PHRASE.len()].copy_from_slice(CANONICAL_PHRASE);
    CANONICAL_PHRASE.len()
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::*;

    use crate::tables::CANONICAL_THRESHOLD;

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn canonical_mask_avx2(draws: &[u64; 4]) -> u32 {
        unsafe {
            let lanes = _mm256_loadu_si256(draws.as_ptr().cast());
            let field = _mm256_and_si256(lanes, _mm256_set1_epi64x(0xFF << 48));
            let threshold = _mm256_set1_epi64x((CANONICAL_THRESHOLD as i64) << 48);
            // Both operands are below 2^56, so the signed compare is exact.
            let below = _mm256_cmpgt_epi64(threshold, field);
            _mm256_movemask_pd(_mm256_castsi256_pd(below)) as u32
        }
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn copy32_avx2(dst: &mut [u8; 32], src: &[u8; 64]) {
        unsafe {
            let v = _mm256_loadu_si256(src.as_ptr().cast());
            _mm256_storeu_si256(dst.as_mut_ptr().cast(), v);
        }
    }

    #[cfg(feature = "avx512")]
    #[target_feature(enable = "avx512f")]
    pub(super) unsafe fn copy64_avx512(dst: &mut [u8; 64], src: &[u8; 64]) {
        unsafe {
            let v = _mm512_loadu_si512(src.as_ptr().cast());
            _mm512_storeu_si512(dst.as_mut_ptr().cast(), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes(checks: [u8; 4]) -> [u64; 4] {
        checks.map(|c| (u64::from(c) << 48) | 0xFF00_0000_FFFF_FFFF)
    }

    #[test]
    fn scalar_mask_thresholds() {
        assert_eq!(canonical_mask_scalar(&lanes([0, 68, 69, 255])), 0b0011);
        assert_eq!(canonical_mask_scalar(&lanes([70, 1, 200, 2])), 0b1010);
    }

    #[test]
    fn every_runnable_tier_agrees_on_mask() {
        let ceiling = skibidi_runtime::host_ceiling();
        let samples = [
            lanes([0, 68, 69, 255]),
            lanes([70, 1, 200, 2]),
            [u64::MAX, 0, 1 << 48, 0x0045_0000_0000_0000],
        ];
        for draws in &samples {
            let expected = canonical_mask_scalar(draws);
            for tier in Tier::ALL {
                assert_eq!(canonical_mask(draws, tier.clamp_to(ceiling)), expected);
            }
        }
    }

    #[test]
    fn every_runnable_tier_writes_the_phrase() {
        let ceiling = skibidi_runtime::host_ceiling();
        for tier in Tier::ALL {
            let mut out = [0xAAu8; 64];
            let len = copy_canonical(&mut out, tier.clamp_to(ceiling));
            assert_eq!(&out[..len], CANONICAL_PHRASE);
        }
    }
}
