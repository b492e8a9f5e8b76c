//! Decision-rate sampling.
//!
//! Draws `samples` decision pairs from a seeded entropy source exactly as the
//! single-item path does (D1 then D2 from primary stream 0), decodes them, and
//! compares each observed rate with the rate implied by the 8-bit thresholds.

use serde::{Deserialize, Serialize};
use skibidi_core::decode::{decode, is_canonical};
use skibidi_core::tables::{
    CANONICAL_THRESHOLD, PREFIX_THRESHOLD, REJECTION_THRESHOLD, WORD_COUNT_CUTS,
};
use skibidi_core::{EntropySource, Mode, Verdict};

/// Tolerance in standard errors.
pub const SIGMA_TOLERANCE: f64 = 5.0;

/// One observed-vs-expected rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub hits: u64,
    pub observed: f64,
    pub expected: f64,
    /// `|observed - expected|` in units of the binomial standard error.
    pub sigma: f64,
    pub pass: bool,
}

impl Metric {
    fn new(name: impl Into<String>, hits: u64, samples: u64, expected: f64) -> Self {
        let observed = if samples == 0 {
            0.0
        } else {
            hits as f64 / samples as f64
        };
        let std_err = (expected * (1.0 - expected) / samples.max(1) as f64).sqrt();
        let sigma = if std_err > 0.0 {
            (observed - expected).abs() / std_err
        } else {
            0.0
        };
        Self {
            name: name.into(),
            hits,
            observed,
            expected,
            sigma,
            pass: samples > 0 && sigma <= SIGMA_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionReport {
    pub seed: u64,
    pub samples: u64,
    pub metrics: Vec<Metric>,
}

impl DistributionReport {
    #[must_use]
    pub fn all_pass(&self) -> bool {
        self.metrics.iter().all(|m| m.pass)
    }

    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Probability of each word count `1..=5`, in 256ths.
#[must_use]
pub fn word_count_weights() -> [u32; 5] {
    let [a, b, c, d] = WORD_COUNT_CUTS;
    [a + 1, b - a, c - b, d - c, 255 - d]
}

/// Sample `samples` decision pairs from `seed`.
#[must_use]
pub fn sample(seed: u64, samples: u64) -> DistributionReport {
    let mut src = EntropySource::from_seed(seed);
    let mut canonical = 0u64;
    let mut words = [0u64; 5];
    let mut approve = 0u64;
    let mut prefix = 0u64;

    for _ in 0..samples {
        let d1 = src.draw();
        let d2 = src.draw();
        canonical += u64::from(is_canonical(d1));
        let d = decode(d1, d2, Mode::CanonicalEligible);
        words[d.word_count - 1] += 1;
        approve += u64::from(d.verdict == Verdict::Approve);
        prefix += u64::from(d.alternate_prefix);
    }

    let rate = |t: u32| f64::from(t) / 256.0;
    let mut metrics = vec![Metric::new(
        "canonical",
        canonical,
        samples,
        rate(CANONICAL_THRESHOLD),
    )];
    for (i, weight) in word_count_weights().into_iter().enumerate() {
        metrics.push(Metric::new(
            format!("word_count_{}", i + 1),
            words[i],
            samples,
            rate(weight),
        ));
    }
    metrics.push(Metric::new(
        "approve",
        approve,
        samples,
        1.0 - rate(REJECTION_THRESHOLD),
    ));
    metrics.push(Metric::new(
        "alternate_prefix",
        prefix,
        samples,
        rate(PREFIX_THRESHOLD),
    ));

    tracing::debug!(seed, samples, "distribution sampled");
    DistributionReport {
        seed,
        samples,
        metrics,
    }
}
