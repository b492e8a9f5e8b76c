//! Execution strategy selection.
//!
//! The selected tier is process-wide and resolved lazily on first use:
//! - `Scalar`: portable code only
//! - `Vector256`: AVX2 classification and 32-byte canonical copies
//! - `Vector512`: AVX-512 canonical copies (requires the `avx512` feature)
//!
//! All tiers produce byte-identical phrases; they differ only in throughput.
//!
//! State lives in one `AtomicU64` holding the resolved tag, the requested
//! configuration and the capability mask. Readers do a single acquire load.
//! Writers (explicit reconfiguration) are serialized by a mutex and publish
//! with a single release store, so a concurrent reader sees either the old or
//! the new strategy, never a mix of the two.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::caps::{Capabilities, probe};

/// Execution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tier {
    /// Portable scalar code.
    Scalar = 0,
    /// 256-bit vectors (AVX2).
    Vector256 = 1,
    /// 512-bit vectors (AVX-512F).
    Vector512 = 2,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 3] = [Tier::Scalar, Tier::Vector256, Tier::Vector512];

    /// Stable lowercase name used by the ABI and the harness.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vector256 => "vector256",
            Self::Vector512 => "vector512",
        }
    }

    /// Parse a tier name (case-insensitive). Accepts the ISA aliases too.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" => Some(Self::Scalar),
            "vector256" | "avx2" | "256" => Some(Self::Vector256),
            "vector512" | "avx512" | "avx-512" | "512" => Some(Self::Vector512),
            _ => None,
        }
    }

    /// Numeric index (0=scalar, 1=256-bit, 2=512-bit).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Lower `self` to at most `ceiling`.
    #[must_use]
    pub fn clamp_to(self, ceiling: Tier) -> Tier {
        self.min(ceiling)
    }

    const fn tag(self) -> u64 {
        self as u64 + 1
    }

    const fn from_tag(tag: u64) -> Option<Tier> {
        match tag {
            1 => Some(Self::Scalar),
            2 => Some(Self::Vector256),
            3 => Some(Self::Vector512),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-controlled strategy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// Permit the 512-bit tier when hardware and build support it.
    pub allow_512: bool,
    /// Permit any vector tier. `false` pins the process to `Scalar`.
    pub allow_vectorized_rng: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_512: true,
            allow_vectorized_rng: true,
        }
    }
}

/// Point-in-time view of the strategy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategySnapshot {
    pub tier: Tier,
    pub capabilities: Capabilities,
    /// Configuration the tier was resolved from.
    pub requested: Config,
}

impl StrategySnapshot {
    /// Configuration actually in effect, derived from the tier.
    #[must_use]
    pub fn effective(&self) -> Config {
        Config {
            allow_512: self.tier == Tier::Vector512,
            allow_vectorized_rng: self.tier >= Tier::Vector256,
        }
    }
}

/// Highest tier this build can emit code for.
#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
pub const BUILD_CEILING: Tier = Tier::Vector512;
#[cfg(all(target_arch = "x86_64", not(feature = "avx512")))]
pub const BUILD_CEILING: Tier = Tier::Vector256;
#[cfg(not(target_arch = "x86_64"))]
pub const BUILD_CEILING: Tier = Tier::Scalar;

// Packed layout:
//   bits 0..8   tier tag (0 = unresolved, else Tier as u8 + 1)
//   bit  8      requested allow_512
//   bit  9      requested allow_vectorized_rng
//   bits 32..64 capability mask
const STATE_UNRESOLVED: u64 = 0;
const TAG_MASK: u64 = 0xFF;
const ALLOW_512_BIT: u64 = 1 << 8;
const ALLOW_VECTOR_BIT: u64 = 1 << 9;
const CAPS_SHIFT: u32 = 32;

static STATE: AtomicU64 = AtomicU64::new(STATE_UNRESOLVED);
static RECONFIGURE: Mutex<()> = parking_lot::const_mutex(());

fn pack(snap: StrategySnapshot) -> u64 {
    let mut word = snap.tier.tag();
    if snap.requested.allow_512 {
        word |= ALLOW_512_BIT;
    }
    if snap.requested.allow_vectorized_rng {
        word |= ALLOW_VECTOR_BIT;
    }
    word | (u64::from(snap.capabilities.bits()) << CAPS_SHIFT)
}

fn unpack(word: u64) -> Option<StrategySnapshot> {
    let tier = Tier::from_tag(word & TAG_MASK)?;
    Some(StrategySnapshot {
        tier,
        capabilities: Capabilities::from_bits((word >> CAPS_SHIFT) as u32),
        requested: Config {
            allow_512: word & ALLOW_512_BIT != 0,
            allow_vectorized_rng: word & ALLOW_VECTOR_BIT != 0,
        },
    })
}

/// Pure resolution rule: the best tier allowed by hardware, build and config.
#[must_use]
pub fn select_tier(caps: Capabilities, config: Config) -> Tier {
    if !config.allow_vectorized_rng {
        return Tier::Scalar;
    }
    if config.allow_512
        && caps.has_vector512()
        && caps.has_vector256()
        && BUILD_CEILING >= Tier::Vector512
    {
        return Tier::Vector512;
    }
    if caps.has_vector256() && BUILD_CEILING >= Tier::Vector256 {
        return Tier::Vector256;
    }
    Tier::Scalar
}

fn resolve(config: Config) -> StrategySnapshot {
    let capabilities = probe();
    StrategySnapshot {
        tier: select_tier(capabilities, config),
        capabilities,
        requested: config,
    }
}

#[cold]
#[inline(never)]
fn resolve_lazily() -> StrategySnapshot {
    let snap = resolve(Config::default());
    match STATE.compare_exchange(
        STATE_UNRESOLVED,
        pack(snap),
        Ordering::AcqRel,
        Ordering::Acquire,
    ) {
        Ok(_) => {
            tracing::debug!(
                tier = snap.tier.name(),
                caps = snap.capabilities.bits(),
                "strategy resolved"
            );
            snap
        }
        // Another thread (or a reconfiguration) published first; theirs wins.
        Err(existing) => unpack(existing).unwrap_or(snap),
    }
}

/// Current strategy, resolving it on first use.
#[inline]
#[must_use]
pub fn snapshot() -> StrategySnapshot {
    match unpack(STATE.load(Ordering::Acquire)) {
        Some(snap) => snap,
        None => resolve_lazily(),
    }
}

/// Tier the next generation call will run.
#[inline]
#[must_use]
pub fn active_tier() -> Tier {
    snapshot().tier
}

/// Capability mask recorded at the last resolution.
#[must_use]
pub fn capabilities() -> Capabilities {
    snapshot().capabilities
}

/// Effective configuration (see [`StrategySnapshot::effective`]).
#[must_use]
pub fn config() -> Config {
    snapshot().effective()
}

/// Highest tier the host can run under the default configuration.
///
/// Used to clamp explicitly requested tiers so vector kernels are never
/// entered on hardware that lacks them.
#[must_use]
pub fn host_ceiling() -> Tier {
    select_tier(capabilities(), Config::default())
}

/// Re-probe the CPU and re-resolve the tier under `config`.
///
/// Takes effect for the next generation call on every thread. Contexts hold no
/// cached tier, so nothing else needs re-initializing.
pub fn configure(config: Config) -> StrategySnapshot {
    let _writer = RECONFIGURE.lock();
    let previous = unpack(STATE.load(Ordering::Acquire));
    let snap = resolve(config);
    STATE.store(pack(snap), Ordering::Release);

    if config.allow_512 && snap.tier < Tier::Vector512 && snap.capabilities.has_vector512() {
        tracing::warn!(
            build_ceiling = BUILD_CEILING.name(),
            "512-bit tier requested but this build does not include it"
        );
    }
    tracing::info!(
        tier = snap.tier.name(),
        previous = previous.map(|p| p.tier.name()).unwrap_or("unresolved"),
        allow_512 = config.allow_512,
        allow_vectorized_rng = config.allow_vectorized_rng,
        "strategy reconfigured"
    );
    snap
}

/// Return the strategy to the unresolved state.
#[cfg(any(test, feature = "test-support"))]
pub fn reset_for_tests() {
    let _writer = RECONFIGURE.lock();
    STATE.store(STATE_UNRESOLVED, Ordering::Release);
}

/// Serializes tests that mutate the global strategy.
#[cfg(any(test, feature = "test-support"))]
pub fn serial_guard() -> parking_lot::MutexGuard<'static, ()> {
    static GUARD: Mutex<()> = parking_lot::const_mutex(());
    GUARD.lock()
}
