//! # skibidi-core
//!
//! Phrase generation engine: a seedable multi-stream multiplicative generator,
//! the bit-field decoder that turns draws into structural decisions, and the
//! assembler that writes phrases into caller-owned buffers.
//!
//! Nothing here allocates on the generation path. `unsafe` is confined to the
//! `simd` kernels and the context wipe.

#![deny(unsafe_code)]

pub mod assemble;
pub mod batch;
pub mod context;
pub mod decode;
pub mod entropy;
pub mod error;
#[allow(unsafe_code)]
mod simd;
pub mod tables;

pub use assemble::{CANONICAL_LEN, MAX_PHRASE_LEN, MIN_BUFFER_SIZE};
pub use context::Context;
pub use decode::{Decisions, Mode, Verdict};
pub use entropy::EntropySource;
pub use error::GenerateError;
pub use skibidi_runtime::{Config, Tier};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library version string.
#[must_use]
pub const fn version() -> &'static str {
    VERSION
}

/// Size in bytes of a [`Context`].
#[must_use]
pub const fn context_size() -> usize {
    core::mem::size_of::<Context>()
}

/// Required alignment of a [`Context`].
#[must_use]
pub const fn context_alignment() -> usize {
    core::mem::align_of::<Context>()
}

/// Size in bytes of the generator state embedded in a context.
#[must_use]
pub const fn rng_state_size() -> usize {
    core::mem::size_of::<EntropySource>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_c_header() {
        assert_eq!(context_size(), 192);
        assert_eq!(context_alignment(), 64);
        assert_eq!(rng_state_size(), 128);
    }

    #[test]
    fn version_is_workspace_version() {
        assert_eq!(version(), "1.7.1");
    }
}
