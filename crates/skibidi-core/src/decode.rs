//! Bit-field decoder: one or two draws in, one set of structural decisions out.
//!
//! First draw (D1), one byte per decision:
//!
//! | bits      | [`Mode::CanonicalEligible`] | [`Mode::ExpandedOnly`] |
//! |-----------|-----------------------------|------------------------|
//! | `[63:56]` | word count                  | word count             |
//! | `[55:48]` | canonical check             | prefix flag            |
//! | `[47:40]` | prefix flag                 | verdict                |
//! | `[39:32]` | verdict                     | unused                 |
//!
//! Second draw (D2): 3-bit substitution fields from bit 0, 5-bit case fields
//! from bit 20, approving verdict indices at 40 and 45, rejecting verdict
//! indices at 50 and 55.

use crate::tables::{
    CANONICAL_THRESHOLD, PREFIX_THRESHOLD, REJECTION_THRESHOLD, VERDICT_FAST_LIMIT, case_class,
    reject_class, word_count,
};

/// Upper bound on lead words.
pub const MAX_WORDS: usize = 5;

/// Whether the canonical fast path may be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `generate`: byte `[55:48]` of D1 may select the canonical phrase.
    CanonicalEligible,
    /// `generate_variant`: always expand, shifting prefix and verdict up a byte.
    ExpandedOnly,
}

/// Verdict polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approve,
    Reject,
}

/// Structural decisions for one expanded phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decisions {
    /// Lead words, `1..=5`.
    pub word_count: usize,
    pub alternate_prefix: bool,
    /// Per-slot substitution flag (only the first `word_count` are used).
    pub substituted: [bool; MAX_WORDS],
    /// Per-slot variant class in `0..=7`.
    pub case_class: [u8; MAX_WORDS],
    pub verdict: Verdict,
    /// Raw 5-bit indices of the two verdict words for the chosen polarity.
    pub verdict_index: [u8; 2],
}

impl Decisions {
    /// Both verdict words render in class 0 through the fixed template.
    #[inline(always)]
    #[must_use]
    pub fn verdict_fast(&self) -> bool {
        u32::from(self.verdict_index[0]) < VERDICT_FAST_LIMIT
            && u32::from(self.verdict_index[1]) < VERDICT_FAST_LIMIT
    }

    /// Variant classes of the two verdict words.
    #[inline(always)]
    #[must_use]
    pub fn verdict_classes(&self) -> [usize; 2] {
        let [a, b] = self.verdict_index.map(u32::from);
        match self.verdict {
            Verdict::Approve => [case_class(a), case_class(b)],
            Verdict::Reject => [reject_class(a), reject_class(b)],
        }
    }
}

#[inline(always)]
const fn byte(draw: u64, shift: u32) -> u32 {
    ((draw >> shift) & 0xFF) as u32
}

#[inline(always)]
const fn field5(draw: u64, shift: u32) -> u8 {
    ((draw >> shift) & 0x1F) as u8
}

/// True when D1 selects the canonical phrase (probability 69/256).
#[inline(always)]
#[must_use]
pub const fn is_canonical(d1: u64) -> bool {
    byte(d1, 48) < CANONICAL_THRESHOLD
}

/// Decode the expanded-path decisions from D1 and D2.
///
/// Does not consult the canonical check; callers test [`is_canonical`] first
/// when `mode` is [`Mode::CanonicalEligible`].
#[inline(always)]
#[must_use]
pub fn decode(d1: u64, d2: u64, mode: Mode) -> Decisions {
    let (prefix_byte, verdict_byte) = match mode {
        Mode::CanonicalEligible => (byte(d1, 40), byte(d1, 32)),
        Mode::ExpandedOnly => (byte(d1, 48), byte(d1, 40)),
    };

    let mut substituted = [false; MAX_WORDS];
    let mut case = [0u8; MAX_WORDS];
    for slot in 0..MAX_WORDS {
        let shift = slot as u32;
        substituted[slot] = (d2 >> (3 * shift)) & 0x7 == 0;
        case[slot] = case_class(u32::from(field5(d2, 20 + 5 * shift))) as u8;
    }

    let verdict = if verdict_byte >= REJECTION_THRESHOLD {
        Verdict::Approve
    } else {
        Verdict::Reject
    };
    let verdict_index = match verdict {
        Verdict::Approve => [field5(d2, 40), field5(d2, 45)],
        Verdict::Reject => [field5(d2, 50), field5(d2, 55)],
    };

    Decisions {
        word_count: word_count(byte(d1, 56)),
        alternate_prefix: prefix_byte < PREFIX_THRESHOLD,
        substituted,
        case_class: case,
        verdict,
        verdict_index,
    }
}
