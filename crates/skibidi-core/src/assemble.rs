//! Phrase assembler.
//!
//! Writes one phrase at the start of a caller buffer and returns its length.
//! Output is not terminated; the returned length is authoritative.

use skibidi_runtime::Tier;

use crate::decode::{self, Decisions, Mode, Verdict};
use crate::entropy::EntropySource;
use crate::error::{GenerateError, check_capacity};
use crate::simd;
use crate::tables::{
    APPROVE_FAST, APPROVE_WORDS, DOM_WORDS, DOP_WORDS, NAME, PREFIX, REJECT_FAST, REJECT_WORDS,
};

/// Smallest buffer accepted by single-phrase calls.
pub const MIN_BUFFER_SIZE: usize = 64;
/// Longest phrase: prefix, name, five words, verdict.
pub const MAX_PHRASE_LEN: usize = 43;
/// Length of the canonical phrase.
pub const CANONICAL_LEN: usize = 24;

const _: () = assert!(MAX_PHRASE_LEN < MIN_BUFFER_SIZE);

/// Write the canonical phrase. `out` must hold [`MIN_BUFFER_SIZE`] bytes and
/// `tier` must already be clamped to the host ceiling.
#[inline(always)]
pub(crate) fn write_canonical(out: &mut [u8], tier: Tier) -> usize {
    simd::copy_canonical(out, tier)
}

/// Write an expanded phrase. `out` must hold [`MAX_PHRASE_LEN`] bytes.
#[inline(always)]
pub(crate) fn write_expanded(out: &mut [u8], d: &Decisions) -> usize {
    // Prefix goes down unconditionally; the name either follows it or
    // overwrites it, selected by arithmetic on the flag.
    out[..PREFIX.len()].copy_from_slice(PREFIX);
    let mut pos = usize::from(d.alternate_prefix) * PREFIX.len();
    out[pos..pos + NAME.len()].copy_from_slice(NAME);
    pos += NAME.len();

    for slot in 0..d.word_count {
        if slot > 0 {
            out[pos] = b' ';
            pos += 1;
        }
        let table = if d.substituted[slot] { &DOM_WORDS } else { &DOP_WORDS };
        out[pos..pos + 3].copy_from_slice(&table[usize::from(d.case_class[slot])]);
        pos += 3;
    }

    out[pos] = b' ';
    pos += 1;

    match (d.verdict, d.verdict_fast()) {
        (Verdict::Approve, true) => {
            out[pos..pos + APPROVE_FAST.len()].copy_from_slice(APPROVE_FAST);
            pos += APPROVE_FAST.len();
        }
        (Verdict::Reject, true) => {
            out[pos..pos + REJECT_FAST.len()].copy_from_slice(REJECT_FAST);
            pos += REJECT_FAST.len();
        }
        (Verdict::Approve, false) => {
            let [a, b] = d.verdict_classes();
            pos = put_pair(out, pos, &APPROVE_WORDS[a], &APPROVE_WORDS[b]);
        }
        (Verdict::Reject, false) => {
            let [a, b] = d.verdict_classes();
            pos = put_pair(out, pos, &REJECT_WORDS[a], &REJECT_WORDS[b]);
        }
    }
    pos
}

#[inline(always)]
fn put_pair(out: &mut [u8], mut pos: usize, first: &[u8], second: &[u8]) -> usize {
    out[pos..pos + first.len()].copy_from_slice(first);
    pos += first.len();
    out[pos] = b' ';
    pos += 1;
    out[pos..pos + second.len()].copy_from_slice(second);
    pos += second.len();
    out[pos] = b'!';
    pos + 1
}

/// Write one phrase from pre-drawn entropy (canonical-eligible decoding).
///
/// `tier` is lowered to what the host can run. Buffers below
/// [`MIN_BUFFER_SIZE`] are rejected untouched.
pub fn write_from_draws(
    out: &mut [u8],
    d1: u64,
    d2: u64,
    tier: Tier,
) -> Result<usize, GenerateError> {
    check_capacity(out.len())?;
    Ok(write_pair(out, d1, d2, tier.clamp_to(skibidi_runtime::host_ceiling())))
}

#[inline(always)]
pub(crate) fn write_pair(out: &mut [u8], d1: u64, d2: u64, tier: Tier) -> usize {
    if decode::is_canonical(d1) {
        return write_canonical(out, tier);
    }
    write_expanded(out, &decode::decode(d1, d2, Mode::CanonicalEligible))
}

/// Single-item path: one draw for the canonical phrase, two otherwise.
#[inline(always)]
pub(crate) fn write_next(src: &mut EntropySource, out: &mut [u8], mode: Mode, tier: Tier) -> usize {
    let d1 = src.draw();
    if mode == Mode::CanonicalEligible && decode::is_canonical(d1) {
        return write_canonical(out, tier);
    }
    let d2 = src.draw();
    write_expanded(out, &decode::decode(d1, d2, mode))
}
