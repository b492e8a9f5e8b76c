//! Context lifecycle and generation entry points.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use skibidi_core::{GenerateError, context_alignment, context_size};

use crate::types::{
    SKIBIDI_ERR_BUFFER_TOO_SMALL, SKIBIDI_ERR_NULL_PTR, SKIBIDI_MIN_BUFFER_SIZE, SKIBIDI_OK,
    SkibidiContext, status_of,
};

/// Null and misaligned context pointers are both unusable.
#[inline]
fn usable(ctx: *const SkibidiContext) -> bool {
    !ctx.is_null() && (ctx as usize) % context_alignment() == 0
}

#[inline]
unsafe fn generate_with(
    ctx: *mut SkibidiContext,
    buffer: *mut c_char,
    buffer_size: usize,
    op: fn(&mut SkibidiContext, &mut [u8]) -> Result<usize, GenerateError>,
) -> c_int {
    if !usable(ctx) || buffer.is_null() {
        return SKIBIDI_ERR_NULL_PTR;
    }
    if buffer_size < SKIBIDI_MIN_BUFFER_SIZE {
        return SKIBIDI_ERR_BUFFER_TOO_SMALL;
    }
    // SAFETY: caller guarantees `ctx` points at an initialized context and
    // `buffer` at `buffer_size` writable bytes; both were checked non-null.
    let (ctx, out) = unsafe {
        (
            &mut *ctx,
            std::slice::from_raw_parts_mut(buffer.cast::<u8>(), buffer_size),
        )
    };
    match op(ctx, out) {
        Ok(len) => len as c_int,
        Err(err) => status_of(err),
    }
}

abi_fn! {
    /// Initialize the context at `ctx` from `seed`. `ctx` may be uninitialized
    /// memory of at least `skibidi_get_context_size()` bytes, 64-byte aligned.
    fn skibidi_init(ctx: *mut SkibidiContext, seed: u64) -> c_int {
        if !usable(ctx) {
            return SKIBIDI_ERR_NULL_PTR;
        }
        ptr::write(ctx, SkibidiContext::new(seed));
        SKIBIDI_OK
    }
}

abi_fn! {
    /// Write one phrase (canonical phrase eligible). Returns the length, or a
    /// negative status.
    fn skibidi_generate(ctx: *mut SkibidiContext, buffer: *mut c_char, buffer_size: usize) -> c_int {
        generate_with(ctx, buffer, buffer_size, SkibidiContext::generate)
    }
}

abi_fn! {
    /// Write one expanded phrase (canonical phrase disabled).
    fn skibidi_generate_variant(
        ctx: *mut SkibidiContext,
        buffer: *mut c_char,
        buffer_size: usize,
    ) -> c_int {
        generate_with(ctx, buffer, buffer_size, SkibidiContext::generate_variant)
    }
}

abi_fn! {
    /// Write up to `count` newline-terminated phrases. Returns how many were
    /// written; invalid arguments produce 0. `lengths`, when non-null, must
    /// hold `count` ints and receives each phrase length.
    fn skibidi_generate_batch(
        ctx: *mut SkibidiContext,
        buffer: *mut c_char,
        buffer_size: usize,
        count: c_int,
        lengths: *mut c_int,
    ) -> c_int {
        if !usable(ctx) || buffer.is_null() {
            return 0;
        }
        if buffer_size < SKIBIDI_MIN_BUFFER_SIZE || count <= 0 {
            return 0;
        }
        let count = count as usize;
        let ctx = &mut *ctx;
        let out = std::slice::from_raw_parts_mut(buffer.cast::<u8>(), buffer_size);
        // Lengths never exceed the phrase maximum, so the u32 and c_int
        // representations agree.
        let lengths = (!lengths.is_null())
            .then(|| std::slice::from_raw_parts_mut(lengths.cast::<u32>(), count));
        ctx.generate_batch(out, count, lengths) as c_int
    }
}

abi_fn! {
    /// Zero every byte of `ctx`. Null is a no-op.
    fn skibidi_destroy(ctx: *mut SkibidiContext) {
        if usable(ctx) {
            (*ctx).destroy();
        }
    }
}

abi_fn! {
    /// Allocate one zeroed, 64-byte aligned context. Call `skibidi_init`
    /// before generating; release with `skibidi_free_context`.
    fn skibidi_alloc_context() -> *mut SkibidiContext {
        skibidi_alloc_context_array(1)
    }
}

abi_fn! {
    /// Allocate `count` contiguous zeroed contexts. Returns null for a zero
    /// count, on overflow, or when the allocator fails.
    fn skibidi_alloc_context_array(count: usize) -> *mut SkibidiContext {
        if count == 0 {
            return ptr::null_mut();
        }
        let Some(bytes) = count.checked_mul(context_size()) else {
            return ptr::null_mut();
        };
        let raw = libc::aligned_alloc(context_alignment(), bytes);
        if raw.is_null() {
            return ptr::null_mut();
        }
        // All-zero is a valid (wiped) context.
        ptr::write_bytes(raw.cast::<u8>(), 0, bytes);
        raw.cast::<SkibidiContext>()
    }
}

abi_fn! {
    /// Wipe and release a context from `skibidi_alloc_context`. Null is a no-op.
    fn skibidi_free_context(ctx: *mut SkibidiContext) {
        skibidi_free_context_array(ctx, 1);
    }
}

abi_fn! {
    /// Wipe all `count` contexts and release the array from
    /// `skibidi_alloc_context_array`. Null is a no-op.
    fn skibidi_free_context_array(ctx: *mut SkibidiContext, count: usize) {
        if !usable(ctx) {
            return;
        }
        for i in 0..count {
            (*ctx.add(i)).destroy();
        }
        libc::free(ctx.cast::<c_void>());
    }
}
