//! Word tables, variant lookups and probability thresholds.
//!
//! All thresholds are 8-bit: a decision is taken by comparing one byte of a
//! draw against a fixed cut, so a threshold `t` means probability `t/256`.

/// Canonical phrase, copied verbatim on the fast path.
pub const CANONICAL_PHRASE: &[u8; 24] = b"Skibidi dop dop yes yes!";

/// Canonical phrase zero-padded to one cache line, source for wide copies.
#[repr(C, align(64))]
pub struct WideCanonical(pub [u8; 64]);

pub static CANONICAL_WIDE: WideCanonical = WideCanonical(pad64(CANONICAL_PHRASE));

const fn pad64(src: &[u8; 24]) -> [u8; 64] {
    let mut out = [0u8; 64];
    let mut i = 0;
    while i < src.len() {
        out[i] = src[i];
        i += 1;
    }
    out
}

/// Alternate prefix (7 bytes including the trailing space).
pub const PREFIX: &[u8; 7] = b"Brrrrr ";
/// Name word (8 bytes including the trailing space).
pub const NAME: &[u8; 8] = b"Skibidi ";

/// Lead word, one entry per variant class.
pub const DOP_WORDS: [[u8; 3]; 8] = [
    *b"dop", *b"Dop", *b"dOp", *b"doP", *b"DOp", *b"DoP", *b"dOP", *b"DOP",
];
/// Substituted lead word, same class order.
pub const DOM_WORDS: [[u8; 3]; 8] = [
    *b"dom", *b"Dom", *b"dOm", *b"doM", *b"DOm", *b"DoM", *b"dOM", *b"DOM",
];
/// Approving verdict word.
pub const APPROVE_WORDS: [[u8; 3]; 8] = [
    *b"yes", *b"Yes", *b"yEs", *b"yeS", *b"YEs", *b"YeS", *b"yES", *b"YES",
];
/// Rejecting verdict word.
pub const REJECT_WORDS: [[u8; 2]; 4] = [*b"no", *b"No", *b"nO", *b"NO"];

/// Both approving verdict words in class 0.
pub const APPROVE_FAST: &[u8; 8] = b"yes yes!";
/// Both rejecting verdict words in class 0.
pub const REJECT_FAST: &[u8; 6] = b"no no!";

/// Canonical fast path taken when the check byte is below this.
pub const CANONICAL_THRESHOLD: u32 = 69;
/// Alternate prefix written when the prefix byte is below this.
pub const PREFIX_THRESHOLD: u32 = 38;
/// Verdict approves when the verdict byte is at or above this.
pub const REJECTION_THRESHOLD: u32 = 38;
/// Verdict fixed template taken when both verdict indices are below this.
pub const VERDICT_FAST_LIMIT: u32 = 26;

/// Word count cuts: count = 1 + number of cuts strictly below the byte.
pub const WORD_COUNT_CUTS: [u32; 4] = [12, 204, 230, 243];

/// 5-bit index to variant class: 25/32 class 0, then one slot per class 1..=7.
pub const CASE_CLASS: [u8; 32] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, //
    1, 2, 3, 4, 5, 6, 7,
];

/// 5-bit index to rejection-word class. The first 26 slots agree with the
/// fixed "no no!" template; the remaining slots wrap around the four classes.
pub const REJECT_CLASS: [u8; 32] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    1, 2, 3, 0, 1, 2,
];

/// Branchless word count in `1..=5`.
#[inline(always)]
#[must_use]
pub const fn word_count(byte: u32) -> usize {
    1 + (byte > WORD_COUNT_CUTS[0]) as usize
        + (byte > WORD_COUNT_CUTS[1]) as usize
        + (byte > WORD_COUNT_CUTS[2]) as usize
        + (byte > WORD_COUNT_CUTS[3]) as usize
}

/// Variant class for a lead or approving word. Only the low 5 bits are used.
#[inline(always)]
#[must_use]
pub const fn case_class(index: u32) -> usize {
    CASE_CLASS[(index & 0x1F) as usize] as usize
}

/// Variant class for a rejecting word. Only the low 5 bits are used.
#[inline(always)]
#[must_use]
pub const fn reject_class(index: u32) -> usize {
    REJECT_CLASS[(index & 0x1F) as usize] as usize
}
