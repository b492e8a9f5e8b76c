//! Integration tests for the C boundary contract.

use std::ffi::{CStr, c_char, c_int};
use std::ptr;

use skibidi_abi::context_abi::{
    skibidi_alloc_context, skibidi_alloc_context_array, skibidi_destroy, skibidi_free_context,
    skibidi_free_context_array, skibidi_generate, skibidi_generate_batch,
    skibidi_generate_variant, skibidi_init,
};
use skibidi_abi::runtime_abi::{
    skibidi_configure, skibidi_get_active_tier, skibidi_get_capabilities, skibidi_get_config,
    skibidi_get_active_simd, skibidi_get_context_alignment, skibidi_get_context_size,
    skibidi_get_rng_state_size, skibidi_has_avx2, skibidi_has_avx512, skibidi_has_vector256,
    skibidi_has_vector512, skibidi_is_512_enabled, skibidi_is_avx512_enabled, skibidi_version,
};
use skibidi_abi::{
    SKIBIDI_CAP_AVX2, SKIBIDI_CAP_AVX512F, SKIBIDI_ERR_BUFFER_TOO_SMALL, SKIBIDI_ERR_NULL_PTR,
    SKIBIDI_OK, SkibidiConfig, SkibidiContext,
};

struct OwnedContext(*mut SkibidiContext);

impl OwnedContext {
    fn new(seed: u64) -> Self {
        // SAFETY: fresh allocation, initialized before use.
        let ctx = unsafe { skibidi_alloc_context() };
        assert!(!ctx.is_null());
        assert_eq!(unsafe { skibidi_init(ctx, seed) }, SKIBIDI_OK);
        Self(ctx)
    }

    fn generate(&self, variant: bool) -> Vec<u8> {
        let mut buf = [0 as c_char; 64];
        // SAFETY: context initialized, buffer is 64 bytes.
        let len = unsafe {
            if variant {
                skibidi_generate_variant(self.0, buf.as_mut_ptr(), buf.len())
            } else {
                skibidi_generate(self.0, buf.as_mut_ptr(), buf.len())
            }
        };
        assert!(len > 0, "status {len}");
        buf[..len as usize].iter().map(|&c| c as u8).collect()
    }
}

impl Drop for OwnedContext {
    fn drop(&mut self) {
        // SAFETY: pointer came from skibidi_alloc_context.
        unsafe { skibidi_free_context(self.0) };
    }
}

fn c_str(p: *const c_char) -> &'static str {
    // SAFETY: the library returns static NUL-terminated strings.
    unsafe { CStr::from_ptr(p) }.to_str().unwrap()
}

#[test]
fn abi_matches_safe_api() {
    let ctx = OwnedContext::new(42);
    let mut safe = skibidi_core::Context::new(42);
    let mut buf = [0u8; 64];
    for i in 0..200 {
        let variant = i % 3 == 0;
        let len = if variant {
            safe.generate_variant(&mut buf).unwrap()
        } else {
            safe.generate(&mut buf).unwrap()
        };
        assert_eq!(ctx.generate(variant), &buf[..len]);
    }
}

#[test]
fn null_pointers_are_rejected() {
    let mut buf = [0 as c_char; 64];
    unsafe {
        assert_eq!(skibidi_init(ptr::null_mut(), 1), SKIBIDI_ERR_NULL_PTR);
        assert_eq!(
            skibidi_generate(ptr::null_mut(), buf.as_mut_ptr(), buf.len()),
            SKIBIDI_ERR_NULL_PTR
        );
        assert_eq!(
            skibidi_generate_batch(ptr::null_mut(), buf.as_mut_ptr(), buf.len(), 4, ptr::null_mut()),
            0
        );
        assert_eq!(skibidi_configure(ptr::null()), SKIBIDI_ERR_NULL_PTR);
        assert_eq!(skibidi_get_config(ptr::null_mut()), SKIBIDI_ERR_NULL_PTR);
        skibidi_destroy(ptr::null_mut());
        skibidi_free_context(ptr::null_mut());
    }
    let ctx = OwnedContext::new(1);
    unsafe {
        assert_eq!(skibidi_generate(ctx.0, ptr::null_mut(), 64), SKIBIDI_ERR_NULL_PTR);
        assert_eq!(
            skibidi_generate_variant(ctx.0, ptr::null_mut(), 64),
            SKIBIDI_ERR_NULL_PTR
        );
    }
}

#[test]
fn small_buffer_is_rejected_without_writes_or_draws() {
    let ctx = OwnedContext::new(9);
    let reference = OwnedContext::new(9);
    let mut small = [0x55 as c_char; 63];
    unsafe {
        assert_eq!(
            skibidi_generate(ctx.0, small.as_mut_ptr(), small.len()),
            SKIBIDI_ERR_BUFFER_TOO_SMALL
        );
        assert_eq!(
            skibidi_generate_variant(ctx.0, small.as_mut_ptr(), small.len()),
            SKIBIDI_ERR_BUFFER_TOO_SMALL
        );
        assert_eq!(
            skibidi_generate_batch(ctx.0, small.as_mut_ptr(), small.len(), 3, ptr::null_mut()),
            0
        );
        assert_eq!((*ctx.0).call_count(), 0);
    }
    assert!(small.iter().all(|&c| c == 0x55));
    assert_eq!(ctx.generate(false), reference.generate(false));
}

#[test]
fn misaligned_context_is_rejected() {
    let ctx = OwnedContext::new(3);
    let skewed = (ctx.0 as usize + 8) as *mut SkibidiContext;
    let mut buf = [0 as c_char; 64];
    unsafe {
        assert_eq!(skibidi_init(skewed, 1), SKIBIDI_ERR_NULL_PTR);
        assert_eq!(
            skibidi_generate(skewed, buf.as_mut_ptr(), buf.len()),
            SKIBIDI_ERR_NULL_PTR
        );
    }
}

#[test]
fn batch_reports_lengths_and_newlines() {
    let ctx = OwnedContext::new(77);
    let mut buf = vec![0 as c_char; 4096];
    let mut lengths = [0 as c_int; 10];
    let n = unsafe {
        skibidi_generate_batch(ctx.0, buf.as_mut_ptr(), buf.len(), 10, lengths.as_mut_ptr())
    };
    assert_eq!(n, 10);
    let mut offset = 0usize;
    for &len in &lengths {
        assert!((8..=43).contains(&len));
        offset += len as usize;
        assert_eq!(buf[offset] as u8, b'\n');
        offset += 1;
    }
    assert_eq!(unsafe { (*ctx.0).call_count() }, 10);

    let none = unsafe { skibidi_generate_batch(ctx.0, buf.as_mut_ptr(), buf.len(), 0, ptr::null_mut()) };
    assert_eq!(none, 0);
    let negative =
        unsafe { skibidi_generate_batch(ctx.0, buf.as_mut_ptr(), buf.len(), -5, ptr::null_mut()) };
    assert_eq!(negative, 0);
}

#[test]
fn destroy_zeroes_every_byte() {
    let ctx = OwnedContext::new(0xABCD);
    ctx.generate(false);
    unsafe {
        skibidi_destroy(ctx.0);
        let bytes = std::slice::from_raw_parts(ctx.0.cast::<u8>(), skibidi_get_context_size());
        assert!(bytes.iter().all(|&b| b == 0));
    }
}

#[test]
fn context_arrays_are_aligned_and_independent() {
    unsafe {
        assert!(skibidi_alloc_context_array(0).is_null());
        assert!(skibidi_alloc_context_array(usize::MAX).is_null());

        let n = 4;
        let array = skibidi_alloc_context_array(n);
        assert!(!array.is_null());
        assert_eq!(array as usize % 64, 0);
        for i in 0..n {
            assert_eq!(skibidi_init(array.add(i), i as u64), SKIBIDI_OK);
        }
        let mut a = [0 as c_char; 64];
        let mut b = [0 as c_char; 64];
        let la = skibidi_generate_variant(array, a.as_mut_ptr(), 64);
        let lb = skibidi_generate_variant(array.add(1), b.as_mut_ptr(), 64);
        assert!(la > 0 && lb > 0);
        assert_eq!((*array.add(2)).call_count(), 0);
        skibidi_free_context_array(array, n);
    }
}

#[test]
fn introspection() {
    let _guard = skibidi_runtime::serial_guard();
    unsafe {
        assert_eq!(c_str(skibidi_version()), "1.7.1");
        assert_eq!(skibidi_get_context_size(), 192);
        assert_eq!(skibidi_get_context_alignment(), 64);
        assert_eq!(skibidi_get_rng_state_size(), 128);

        let caps = skibidi_get_capabilities();
        assert_eq!(skibidi_has_vector256() != 0, caps & SKIBIDI_CAP_AVX2 != 0);
        assert_eq!(skibidi_has_vector512() != 0, caps & SKIBIDI_CAP_AVX512F != 0);

        let tier = c_str(skibidi_get_active_tier());
        assert!(["scalar", "vector256", "vector512"].contains(&tier));
        assert_eq!(skibidi_is_512_enabled() != 0, tier == "vector512");
    }
}

#[test]
fn legacy_names_alias_current_ones() {
    let _guard = skibidi_runtime::serial_guard();
    unsafe {
        assert_eq!(skibidi_has_avx2(), skibidi_has_vector256());
        assert_eq!(skibidi_has_avx512(), skibidi_has_vector512());
        assert_eq!(skibidi_is_avx512_enabled(), skibidi_is_512_enabled());
        let legacy = match c_str(skibidi_get_active_tier()) {
            "scalar" => "Scalar",
            "vector256" => "AVX2",
            _ => "AVX-512",
        };
        assert_eq!(c_str(skibidi_get_active_simd()), legacy);
    }
}

#[test]
fn configure_round_trip() {
    let _guard = skibidi_runtime::serial_guard();
    unsafe {
        let scalar_only = SkibidiConfig {
            enable_avx512: 1,
            enable_simd_rng: 0,
            reserved: [0; 6],
        };
        assert_eq!(skibidi_configure(&scalar_only), SKIBIDI_OK);
        assert_eq!(c_str(skibidi_get_active_tier()), "scalar");

        let mut effective = SkibidiConfig::default();
        assert_eq!(skibidi_get_config(&mut effective), SKIBIDI_OK);
        assert_eq!(effective.enable_avx512, 0);
        assert_eq!(effective.enable_simd_rng, 0);

        let all = SkibidiConfig {
            enable_avx512: 1,
            enable_simd_rng: 1,
            reserved: [0; 6],
        };
        assert_eq!(skibidi_configure(&all), SKIBIDI_OK);
        assert_eq!(skibidi_get_config(&mut effective), SKIBIDI_OK);
        let tier = skibidi_runtime::active_tier();
        assert_eq!(effective.enable_simd_rng != 0, tier >= skibidi_runtime::Tier::Vector256);
        assert_eq!(effective.enable_avx512 != 0, tier == skibidi_runtime::Tier::Vector512);
    }
}
