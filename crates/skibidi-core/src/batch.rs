//! Batch engine: newline-separated phrases, four at a time.
//!
//! Each full round pre-draws two quads over the primary streams (D1 and D2
//! for four items), classifies all four D1 values for the canonical phrase in
//! one compare, then assembles each item from its pre-drawn pair. Items left
//! over after the last full round take the single-item path.
//!
//! The decoding is the same on every tier, so a batch is byte-identical
//! whichever tier ran it.

use skibidi_runtime::Tier;

use crate::assemble::{self, MIN_BUFFER_SIZE};
use crate::decode::{self, Mode};
use crate::entropy::EntropySource;
use crate::simd;

const LANES: usize = 4;

/// Space a full round must have available before it starts.
pub const ROUND_RESERVE: usize = LANES * MIN_BUFFER_SIZE;

/// Fill `out` with up to `requested` phrases, each followed by `\n`.
///
/// Returns the number of phrases written. Stops early rather than write a
/// partial phrase. Full rounds run only while [`ROUND_RESERVE`] bytes remain,
/// so the phrases drawn depend on the buffer size as well as the seed. When `lengths` is given it receives each phrase length
/// (newline excluded) and also caps the count.
pub(crate) fn fill(
    src: &mut EntropySource,
    out: &mut [u8],
    requested: usize,
    mut lengths: Option<&mut [u32]>,
    tier: Tier,
) -> usize {
    let requested = match lengths.as_deref() {
        Some(slots) => requested.min(slots.len()),
        None => requested,
    };
    let capacity = out.len();
    let mut produced = 0usize;
    let mut offset = 0usize;

    while produced + LANES <= requested && offset + ROUND_RESERVE <= capacity {
        let d1 = src.draw4();
        let d2 = src.draw4();
        let canonical = simd::canonical_mask(&d1, tier);

        for lane in 0..LANES {
            let slot = &mut out[offset..];
            let len = if (canonical >> lane) & 1 != 0 {
                assemble::write_canonical(slot, tier)
            } else {
                assemble::write_expanded(slot, &decode::decode(d1[lane], d2[lane], Mode::CanonicalEligible))
            };
            slot[len] = b'\n';
            if let Some(slots) = lengths.as_deref_mut() {
                slots[produced] = len as u32;
            }
            offset += len + 1;
            produced += 1;
        }
    }

    while produced < requested && offset + MIN_BUFFER_SIZE <= capacity {
        let slot = &mut out[offset..];
        let len = assemble::write_next(src, slot, Mode::CanonicalEligible, tier);
        slot[len] = b'\n';
        if let Some(slots) = lengths.as_deref_mut() {
            slots[produced] = len as u32;
        }
        offset += len + 1;
        produced += 1;
    }

    produced
}
