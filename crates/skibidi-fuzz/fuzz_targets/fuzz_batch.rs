#![no_main]
use libfuzzer_sys::fuzz_target;
use skibidi_core::{Context, MAX_PHRASE_LEN};

// Arbitrary seed, count and capacity: the batch never overruns, and lengths
// agree with the newline positions.
fuzz_target!(|data: &[u8]| {
    let Some((seed, rest)) = data.split_first_chunk::<8>() else {
        return;
    };
    let Some((&count, rest)) = rest.split_first() else {
        return;
    };
    let capacity = rest
        .first_chunk::<2>()
        .map_or(64, |c| usize::from(u16::from_le_bytes(*c)) % 4096);

    let mut ctx = Context::new(u64::from_le_bytes(*seed));
    let mut out = vec![0u8; capacity];
    let mut lengths = vec![0u32; usize::from(count)];
    let produced = ctx.generate_batch(&mut out, usize::from(count), Some(&mut lengths[..]));
    assert!(produced <= usize::from(count));

    let mut offset = 0usize;
    for &len in &lengths[..produced] {
        let len = len as usize;
        assert!(len <= MAX_PHRASE_LEN);
        assert_eq!(out[offset + len], b'\n');
        offset += len + 1;
    }
    assert!(offset <= capacity);
});
