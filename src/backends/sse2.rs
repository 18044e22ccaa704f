//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! This backend uses SSE2 intrinsics for 128-bit SIMD operations.
//! SSE2 is available on all x86_64 CPUs as a baseline requirement.
//!
//! One register holds two interleaved complex values `[a0, b0, a1, b1]`.
//! A group of eight complex values is four registers.
//!
//! # Performance
//!
//! Expected speedup: ~2x over scalar for 1K+ elements (two complex per register)
//!
//! # Safety
//!
//! All SSE2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use num_complex::Complex32;

use super::{scal_tail, ScalBackend, GROUP_SIZE};

/// SSE2 backend (128-bit SIMD for x86_64)
pub struct Sse2Backend;

/// Multiply two packed complex values by `c + di`.
///
/// `re = a*c + (-(b*d))`, `im = b*c + a*d`: the same products and sums as
/// the scalar formula, so results are bit-identical.
#[inline(always)]
unsafe fn cmul_ps(v: __m128, c: __m128, d: __m128, neg_re: __m128) -> __m128 {
    let ac_bc = _mm_mul_ps(v, c);
    // [a0, b0, a1, b1] -> [b0, a0, b1, a1]
    let swapped = _mm_shuffle_ps::<0b10_11_00_01>(v, v);
    let bd_ad = _mm_xor_ps(_mm_mul_ps(swapped, d), neg_re);
    _mm_add_ps(ac_bc, bd_ad)
}

impl ScalBackend for Sse2Backend {
    #[target_feature(enable = "sse2")]
    unsafe fn scal(alpha: Complex32, x: &mut [Complex32]) {
        let len = x.len();
        let ptr = x.as_mut_ptr() as *mut f32;
        let mut i = 0;

        // Broadcast alpha's parts to all 4 lanes
        let c = _mm_set1_ps(alpha.re);
        let d = _mm_set1_ps(alpha.im);
        // Flips the sign of the real lane of each pair
        let neg_re = _mm_set_ps(0.0, -0.0, 0.0, -0.0);

        // Process 8 complex (16 floats, 4 registers) at a time
        while i + GROUP_SIZE <= len {
            let p = ptr.add(2 * i);
            let v0 = _mm_loadu_ps(p);
            let v1 = _mm_loadu_ps(p.add(4));
            let v2 = _mm_loadu_ps(p.add(8));
            let v3 = _mm_loadu_ps(p.add(12));
            _mm_storeu_ps(p, cmul_ps(v0, c, d, neg_re));
            _mm_storeu_ps(p.add(4), cmul_ps(v1, c, d, neg_re));
            _mm_storeu_ps(p.add(8), cmul_ps(v2, c, d, neg_re));
            _mm_storeu_ps(p.add(12), cmul_ps(v3, c, d, neg_re));
            i += GROUP_SIZE;
        }

        // Handle remaining elements
        scal_tail(alpha, &mut x[i..]);
    }
}
