#![no_main]
use libfuzzer_sys::fuzz_target;
use skibidi_core::assemble::write_from_draws;
use skibidi_core::{MAX_PHRASE_LEN, MIN_BUFFER_SIZE, Tier};

// Any pair of draws must assemble a well-formed phrase.
fuzz_target!(|data: &[u8]| {
    let Some((d1, rest)) = data.split_first_chunk::<8>() else {
        return;
    };
    let Some((d2, rest)) = rest.split_first_chunk::<8>() else {
        return;
    };
    let tier = Tier::ALL[usize::from(rest.first().copied().unwrap_or(0)) % Tier::ALL.len()];
    let (d1, d2) = (u64::from_le_bytes(*d1), u64::from_le_bytes(*d2));

    let mut out = [0u8; MIN_BUFFER_SIZE];
    let len = write_from_draws(&mut out, d1, d2, tier).expect("buffer holds a phrase");
    assert!(len <= MAX_PHRASE_LEN);
    let phrase = &out[..len];
    assert!(phrase.ends_with(b"!"));
    assert!(phrase.is_ascii());
    assert!(!phrase.contains(&b'\n'));
});
