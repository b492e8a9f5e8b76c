// All extern "C" exports take raw pointers from C callers and validate them in
// the body, so per-function safety docs would repeat the same paragraph.
#![allow(clippy::missing_safety_doc)]
//! # skibidi-abi
//!
//! `extern "C"` boundary for the skibidi phrase engine.
//!
//! This crate produces a `cdylib` exposing the `skibidi_*` symbols. Each entry
//! validates its pointers, converts sizes, and delegates to `skibidi-core`.
//! Failures are reported as integer status codes; nothing unwinds across the
//! boundary.
//!
//! ```text
//! C caller -> ABI entry (this crate) -> pointer/size checks -> core -> status
//! ```

#[macro_use]
mod macros;

pub mod context_abi;
pub mod runtime_abi;
pub mod types;

pub use types::{
    SKIBIDI_CACHE_LINE_SIZE, SKIBIDI_CAP_AVX, SKIBIDI_CAP_AVX2, SKIBIDI_CAP_AVX512BW,
    SKIBIDI_CAP_AVX512DQ, SKIBIDI_CAP_AVX512F, SKIBIDI_CAP_AVX512VL, SKIBIDI_CAP_SSE2,
    SKIBIDI_ERR_BUFFER_TOO_SMALL, SKIBIDI_ERR_INVALID_CONFIG, SKIBIDI_ERR_NULL_PTR,
    SKIBIDI_MIN_BUFFER_SIZE, SKIBIDI_OK, SkibidiConfig, SkibidiContext, status_of,
};
