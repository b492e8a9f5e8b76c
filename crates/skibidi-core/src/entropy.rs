//! Multi-stream multiplicative generator.
//!
//! Each stream is a 64-bit multiplicative congruential generator advanced by a
//! single 64x64->128 multiply: the low half of the product is the next state,
//! and the two halves folded together with xor are the output. The high half
//! alone is bounded by the multiplier and the low half alone carries the weak
//! low bits of a power-of-two modulus; the fold has neither problem.
//!
//! Four primary streams feed phrase generation (lane 0 on the single-item
//! path, all four on the batch path). Four auxiliary streams refill the
//! general-purpose draw buffer behind [`EntropySource::next_u64`], so those
//! draws never perturb the phrase stream.

use core::fmt;

/// Fixed multiplier. Odd and `5 (mod 8)`, so odd states have period 2^62.
pub const MULTIPLIER: u64 = 0xda94_2042_e4dd_58b5;

/// Per-stream seed spacing (2^64 / golden ratio).
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
/// Offset that separates the auxiliary seed set from the primary one.
const AUXILIARY_OFFSET: u64 = 0x6A09_E667_F3BC_C908;

const LANES: usize = 4;

/// Avalanche mix used for seed expansion.
#[inline]
#[must_use]
pub const fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Advance one stream and return its output.
#[inline(always)]
pub fn step(state: &mut u64) -> u64 {
    let product = u128::from(*state) * u128::from(MULTIPLIER);
    *state = product as u64;
    fold(product)
}

#[inline(always)]
const fn fold(product: u128) -> u64 {
    (product as u64) ^ ((product >> 64) as u64)
}

/// Advance four streams. Bit-identical to four sequential [`step`] calls; the
/// multiplies carry no data dependency on each other.
#[inline(always)]
pub fn step4(states: &mut [u64; LANES]) -> [u64; LANES] {
    let p0 = u128::from(states[0]) * u128::from(MULTIPLIER);
    let p1 = u128::from(states[1]) * u128::from(MULTIPLIER);
    let p2 = u128::from(states[2]) * u128::from(MULTIPLIER);
    let p3 = u128::from(states[3]) * u128::from(MULTIPLIER);
    *states = [p0 as u64, p1 as u64, p2 as u64, p3 as u64];
    [fold(p0), fold(p1), fold(p2), fold(p3)]
}

/// Generator state embedded in every context (128 bytes, C layout).
#[derive(Clone, PartialEq, Eq)]
#[repr(C, align(32))]
pub struct EntropySource {
    primary: [u64; LANES],
    auxiliary: [u64; LANES],
    buffer: [u64; LANES],
    cursor: u32,
    _pad: u32,
    _reserved: [u64; 2],
}

const _: () = assert!(core::mem::size_of::<EntropySource>() == 128);

impl EntropySource {
    /// Expand `seed` into eight odd stream states.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut primary = [0u64; LANES];
        let mut auxiliary = [0u64; LANES];
        for lane in 0..LANES {
            let base = seed.wrapping_add((lane as u64).wrapping_mul(GOLDEN_GAMMA));
            primary[lane] = mix64(base) | 1;
            auxiliary[lane] = mix64(base.wrapping_add(AUXILIARY_OFFSET)) | 1;
        }
        Self {
            primary,
            auxiliary,
            buffer: [0; LANES],
            cursor: LANES as u32,
            _pad: 0,
            _reserved: [0; 2],
        }
    }

    /// One draw from primary stream 0.
    #[inline(always)]
    pub fn draw(&mut self) -> u64 {
        step(&mut self.primary[0])
    }

    /// One draw from each primary stream.
    #[inline(always)]
    pub fn draw4(&mut self) -> [u64; LANES] {
        step4(&mut self.primary)
    }

    /// General-purpose draw from the auxiliary streams, four at a time.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        if self.cursor as usize >= LANES {
            self.buffer = step4(&mut self.auxiliary);
            self.cursor = 0;
        }
        let value = self.buffer[self.cursor as usize];
        self.cursor += 1;
        value
    }

    #[must_use]
    pub fn primary(&self) -> &[u64; LANES] {
        &self.primary
    }

    #[must_use]
    pub fn auxiliary(&self) -> &[u64; LANES] {
        &self.auxiliary
    }

    /// Every word of the state, in memory order.
    pub(crate) fn words(&self) -> impl Iterator<Item = u64> + '_ {
        self.primary
            .iter()
            .chain(&self.auxiliary)
            .chain(&self.buffer)
            .copied()
            .chain(core::iter::once(
                u64::from(self.cursor) | (u64::from(self._pad) << 32),
            ))
            .chain(self._reserved.iter().copied())
    }
}

impl fmt::Debug for EntropySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Stream states are not printed.
        f.debug_struct("EntropySource")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
