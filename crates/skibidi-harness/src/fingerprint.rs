//! Phrase-stream fingerprints.
//!
//! A fingerprint is the SHA-256 of `count` seeded phrases, each followed by a
//! newline. Every tier must produce the same digest for the same seed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use skibidi_core::{Context, MIN_BUFFER_SIZE, Tier};

use crate::HarnessError;

/// Which entry point produced the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Generate,
    Variant,
    Batch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub seed: u64,
    pub count: u64,
    pub tier: String,
    pub stream: Stream,
    pub bytes: u64,
    pub sha256: String,
}

fn hex_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

/// Phrases per batch call.
const BATCH_CHUNK: usize = 64;

/// Fingerprint `count` phrases on `tier` (clamped to what the host runs).
pub fn fingerprint(
    seed: u64,
    count: u64,
    tier: Tier,
    stream: Stream,
) -> Result<Fingerprint, HarnessError> {
    let tier = tier.clamp_to(skibidi_runtime::host_ceiling());
    let mut ctx = Context::new(seed);
    let mut hasher = Sha256::new();
    let mut bytes = 0u64;

    match stream {
        Stream::Generate | Stream::Variant => {
            let mut buf = [0u8; MIN_BUFFER_SIZE];
            for _ in 0..count {
                let len = match stream {
                    Stream::Variant => ctx.generate_variant_on(tier, &mut buf)?,
                    _ => ctx.generate_on(tier, &mut buf)?,
                };
                hasher.update(&buf[..len]);
                hasher.update(b"\n");
                bytes += len as u64 + 1;
            }
        }
        Stream::Batch => {
            let mut buf = vec![
                0u8;
                BATCH_CHUNK * (skibidi_core::MAX_PHRASE_LEN + 1) + skibidi_core::batch::ROUND_RESERVE
            ];
            let mut lengths = [0u32; BATCH_CHUNK];
            let mut remaining = count;
            while remaining > 0 {
                let want = remaining.min(BATCH_CHUNK as u64) as usize;
                let produced = ctx.generate_batch_on(tier, &mut buf, want, Some(&mut lengths[..]));
                let used: usize = lengths[..produced].iter().map(|&l| l as usize + 1).sum();
                hasher.update(&buf[..used]);
                bytes += used as u64;
                remaining -= produced as u64;
                if produced == 0 {
                    break;
                }
            }
        }
    }

    Ok(Fingerprint {
        seed,
        count,
        tier: tier.name().to_string(),
        stream,
        bytes,
        sha256: hex_lower(&hasher.finalize()),
    })
}

/// Fingerprint the stream on every tier the host can run.
pub fn fingerprint_all_tiers(
    seed: u64,
    count: u64,
    stream: Stream,
) -> Result<Vec<Fingerprint>, HarnessError> {
    let ceiling = skibidi_runtime::host_ceiling();
    Tier::ALL
        .into_iter()
        .filter(|&t| t <= ceiling)
        .map(|t| fingerprint(seed, count, t, stream))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(hex_lower(&[0x00, 0xAB, 0x0f]), "00ab0f");
    }

    #[test]
    fn empty_stream_is_the_empty_digest() {
        let fp = fingerprint(1, 0, Tier::Scalar, Stream::Generate).unwrap();
        assert_eq!(
            fp.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(fp.bytes, 0);
    }

    #[test]
    fn same_seed_same_digest() {
        let a = fingerprint(42, 100, Tier::Scalar, Stream::Variant).unwrap();
        let b = fingerprint(42, 100, Tier::Scalar, Stream::Variant).unwrap();
        assert_eq!(a, b);
        let c = fingerprint(43, 100, Tier::Scalar, Stream::Variant).unwrap();
        assert_ne!(a.sha256, c.sha256);
    }
}
