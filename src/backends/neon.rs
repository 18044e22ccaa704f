//! ARM NEON backend implementation (aarch64 128-bit SIMD)
//!
//! One register holds two interleaved complex values `[a0, b0, a1, b1]`.
//! A group of eight complex values is four registers. NEON is mandatory on
//! AArch64, so this backend is always available there.
//!
//! # Safety
//!
//! All NEON intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use num_complex::Complex32;

use super::{scal_tail, ScalBackend, GROUP_SIZE};

/// ARM NEON backend (128-bit SIMD)
pub struct NeonBackend;

#[inline]
#[target_feature(enable = "neon")]
unsafe fn cmul_f32(v: float32x4_t, c: float32x4_t, d: float32x4_t, neg_re: uint32x4_t) -> float32x4_t {
    let ac_bc = vmulq_f32(v, c);
    // [a0, b0, a1, b1] -> [b0, a0, b1, a1]
    let swapped = vrev64q_f32(v);
    let bd_ad = vreinterpretq_f32_u32(veorq_u32(
        vreinterpretq_u32_f32(vmulq_f32(swapped, d)),
        neg_re,
    ));
    vaddq_f32(ac_bc, bd_ad)
}

impl ScalBackend for NeonBackend {
    #[target_feature(enable = "neon")]
    unsafe fn scal(alpha: Complex32, x: &mut [Complex32]) {
        let len = x.len();
        let ptr = x.as_mut_ptr() as *mut f32;
        let mut i = 0;

        let c = vdupq_n_f32(alpha.re);
        let d = vdupq_n_f32(alpha.im);
        let mask: [u32; 4] = [0x8000_0000, 0, 0x8000_0000, 0];
        let neg_re = vld1q_u32(mask.as_ptr());

        // Process 8 complex (16 floats, 4 registers) at a time
        while i + GROUP_SIZE <= len {
            let p = ptr.add(2 * i);
            let v0 = vld1q_f32(p);
            let v1 = vld1q_f32(p.add(4));
            let v2 = vld1q_f32(p.add(8));
            let v3 = vld1q_f32(p.add(12));
            vst1q_f32(p, cmul_f32(v0, c, d, neg_re));
            vst1q_f32(p.add(4), cmul_f32(v1, c, d, neg_re));
            vst1q_f32(p.add(8), cmul_f32(v2, c, d, neg_re));
            vst1q_f32(p.add(12), cmul_f32(v3, c, d, neg_re));
            i += GROUP_SIZE;
        }

        // Handle remaining elements
        scal_tail(alpha, &mut x[i..]);
    }
}
