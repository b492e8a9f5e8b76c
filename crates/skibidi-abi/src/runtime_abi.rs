//! Strategy configuration and introspection entry points.

use std::ffi::{CStr, c_char, c_int};

use skibidi_core::Config;
use skibidi_runtime::Tier;

use crate::types::{SKIBIDI_ERR_NULL_PTR, SKIBIDI_OK, SkibidiConfig};

static VERSION: &CStr = match CStr::from_bytes_with_nul(
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes(),
) {
    Ok(version) => version,
    Err(_) => c"unknown",
};

const fn tier_name(tier: Tier) -> &'static CStr {
    match tier {
        Tier::Scalar => c"scalar",
        Tier::Vector256 => c"vector256",
        Tier::Vector512 => c"vector512",
    }
}

abi_fn! {
    /// Re-probe the CPU and re-resolve the tier. Takes effect for the next
    /// generation call on every thread.
    fn skibidi_configure(config: *const SkibidiConfig) -> c_int {
        let Some(raw) = config.as_ref() else {
            return SKIBIDI_ERR_NULL_PTR;
        };
        skibidi_runtime::configure(Config::from(raw));
        SKIBIDI_OK
    }
}

abi_fn! {
    /// Report the effective configuration (what the active tier permits).
    fn skibidi_get_config(config: *mut SkibidiConfig) -> c_int {
        let Some(out) = config.as_mut() else {
            return SKIBIDI_ERR_NULL_PTR;
        };
        *out = SkibidiConfig::from(skibidi_runtime::config());
        SKIBIDI_OK
    }
}

abi_fn! {
    /// NUL-terminated library version.
    fn skibidi_version() -> *const c_char {
        VERSION.as_ptr()
    }
}

abi_fn! {
    /// NUL-terminated name of the active tier: "scalar", "vector256" or "vector512".
    fn skibidi_get_active_tier() -> *const c_char {
        tier_name(skibidi_runtime::active_tier()).as_ptr()
    }
}

abi_fn! {
    fn skibidi_has_vector256() -> c_int {
        c_int::from(skibidi_runtime::capabilities().has_vector256())
    }
}

abi_fn! {
    fn skibidi_has_vector512() -> c_int {
        c_int::from(skibidi_runtime::capabilities().has_vector512())
    }
}

abi_fn! {
    /// Capability bitmask (`SKIBIDI_CAP_*`).
    fn skibidi_get_capabilities() -> u32 {
        skibidi_runtime::capabilities().bits()
    }
}

abi_fn! {
    fn skibidi_is_512_enabled() -> c_int {
        c_int::from(skibidi_runtime::active_tier() == Tier::Vector512)
    }
}

// Names from the 1.x header, kept as aliases.

abi_fn! {
    fn skibidi_has_avx2() -> c_int {
        skibidi_has_vector256()
    }
}

abi_fn! {
    fn skibidi_has_avx512() -> c_int {
        skibidi_has_vector512()
    }
}

abi_fn! {
    fn skibidi_is_avx512_enabled() -> c_int {
        skibidi_is_512_enabled()
    }
}

abi_fn! {
    /// Active tier under its 1.x display name: "AVX-512", "AVX2" or "Scalar".
    fn skibidi_get_active_simd() -> *const c_char {
        let name = match skibidi_runtime::active_tier() {
            Tier::Scalar => c"Scalar",
            Tier::Vector256 => c"AVX2",
            Tier::Vector512 => c"AVX-512",
        };
        name.as_ptr()
    }
}

abi_fn! {
    fn skibidi_get_rng_state_size() -> usize {
        skibidi_core::rng_state_size()
    }
}

abi_fn! {
    fn skibidi_get_context_size() -> usize {
        skibidi_core::context_size()
    }
}

abi_fn! {
    fn skibidi_get_context_alignment() -> usize {
        skibidi_core::context_alignment()
    }
}
