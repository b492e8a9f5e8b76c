//! Per-caller generation context.
//!
//! Layout is fixed (192 bytes, 64-byte aligned) so contexts can be placed in
//! foreign memory and packed into arrays without two contexts sharing a cache
//! line.

use core::fmt;
use core::sync::atomic::{Ordering, compiler_fence};

use skibidi_runtime::Tier;

use crate::assemble;
use crate::batch;
use crate::decode::Mode;
use crate::entropy::EntropySource;
use crate::error::{GenerateError, check_capacity};

/// Generator state plus a lifetime phrase counter.
///
/// One context per concurrent caller; a context is never shared. Dropping a
/// context wipes it.
#[repr(C, align(64))]
pub struct Context {
    entropy: EntropySource,
    call_count: u64,
    _reserved: [u64; 7],
}

const _: () = assert!(core::mem::size_of::<Context>() == 192);
const _: () = assert!(core::mem::align_of::<Context>() == 64);

const WORDS: usize = core::mem::size_of::<Context>() / 8;

impl Context {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            entropy: EntropySource::from_seed(seed),
            call_count: 0,
            _reserved: [0; 7],
        }
    }

    /// Reinitialize in place, discarding all prior state.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// One phrase, canonical fast path eligible, on the active tier.
    pub fn generate(&mut self, out: &mut [u8]) -> Result<usize, GenerateError> {
        self.emit(out, Mode::CanonicalEligible, skibidi_runtime::active_tier())
    }

    /// One expanded phrase (canonical fast path disabled), on the active tier.
    pub fn generate_variant(&mut self, out: &mut [u8]) -> Result<usize, GenerateError> {
        self.emit(out, Mode::ExpandedOnly, skibidi_runtime::active_tier())
    }

    /// [`generate`](Self::generate) on an explicit tier, lowered to what the
    /// host can run.
    pub fn generate_on(&mut self, tier: Tier, out: &mut [u8]) -> Result<usize, GenerateError> {
        let tier = tier.clamp_to(skibidi_runtime::host_ceiling());
        self.emit(out, Mode::CanonicalEligible, tier)
    }

    /// [`generate_variant`](Self::generate_variant) on an explicit tier.
    pub fn generate_variant_on(
        &mut self,
        tier: Tier,
        out: &mut [u8],
    ) -> Result<usize, GenerateError> {
        let tier = tier.clamp_to(skibidi_runtime::host_ceiling());
        self.emit(out, Mode::ExpandedOnly, tier)
    }

    /// Up to `count` newline-terminated phrases; returns how many were written.
    ///
    /// A buffer below the single-phrase minimum or a zero count writes nothing
    /// and leaves the context untouched.
    ///
    /// Output depends on the buffer size as well as the seed: four-item rounds
    /// need [`ROUND_RESERVE`](crate::batch::ROUND_RESERVE) free bytes, and
    /// below that items are drawn one at a time, which consumes entropy in a
    /// different order. Equal seeds and equal capacities always agree.
    pub fn generate_batch(
        &mut self,
        out: &mut [u8],
        count: usize,
        lengths: Option<&mut [u32]>,
    ) -> usize {
        self.batch(out, count, lengths, skibidi_runtime::active_tier())
    }

    /// [`generate_batch`](Self::generate_batch) on an explicit tier.
    pub fn generate_batch_on(
        &mut self,
        tier: Tier,
        out: &mut [u8],
        count: usize,
        lengths: Option<&mut [u32]>,
    ) -> usize {
        let tier = tier.clamp_to(skibidi_runtime::host_ceiling());
        self.batch(out, count, lengths, tier)
    }

    /// General-purpose draw, independent of the phrase stream.
    pub fn next_u64(&mut self) -> u64 {
        self.entropy.next_u64()
    }

    /// Phrases produced since initialization.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    #[must_use]
    pub fn entropy(&self) -> &EntropySource {
        &self.entropy
    }

    /// Overwrite every byte with zero. The stores are volatile so the wipe
    /// survives even when the context is never read again.
    #[allow(unsafe_code)]
    pub fn destroy(&mut self) {
        let words = (self as *mut Self).cast::<u64>();
        for i in 0..WORDS {
            // SAFETY: `Context` is `repr(C)`, 192 bytes, 64-byte aligned and has
            // no padding or niche, so it is exactly `WORDS` initialized u64s and
            // all-zero is a valid value.
            unsafe {
                core::ptr::write_volatile(words.add(i), 0);
            }
        }
        compiler_fence(Ordering::SeqCst);
    }

    /// True when every byte of the context is zero.
    #[must_use]
    pub fn is_wiped(&self) -> bool {
        self.call_count == 0
            && self._reserved.iter().all(|&w| w == 0)
            && self.entropy.words().all(|w| w == 0)
    }

    #[inline]
    fn emit(&mut self, out: &mut [u8], mode: Mode, tier: Tier) -> Result<usize, GenerateError> {
        check_capacity(out.len())?;
        let len = assemble::write_next(&mut self.entropy, out, mode, tier);
        self.call_count = self.call_count.wrapping_add(1);
        Ok(len)
    }

    #[inline]
    fn batch(
        &mut self,
        out: &mut [u8],
        count: usize,
        lengths: Option<&mut [u32]>,
        tier: Tier,
    ) -> usize {
        if count == 0 || check_capacity(out.len()).is_err() {
            return 0;
        }
        let produced = batch::fill(&mut self.entropy, out, count, lengths, tier);
        self.call_count = self.call_count.wrapping_add(produced as u64);
        produced
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("call_count", &self.call_count)
            .finish_non_exhaustive()
    }
}
