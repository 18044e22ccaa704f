//! AVX2 backend implementation (x86_64 advanced SIMD)
//!
//! This backend uses 256-bit AVX registers holding four interleaved complex
//! values. A group of eight complex values is two registers.
//! AVX2 is available on Intel Haswell (2013+) and AMD Excavator (2015+) CPUs.
//!
//! No FMA: every product is rounded before the add, matching the scalar tail
//! bit for bit.
//!
//! # Safety
//!
//! All AVX2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use num_complex::Complex32;

use super::{scal_tail, ScalBackend, GROUP_SIZE};

/// AVX2 backend (256-bit SIMD for x86_64)
pub struct Avx2Backend;

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn cmul_ps(v: __m256, c: __m256, d: __m256, neg_re: __m256) -> __m256 {
    let ac_bc = _mm256_mul_ps(v, c);
    // Swap re/im within each pair (per 128-bit lane)
    let swapped = _mm256_permute_ps::<0b10_11_00_01>(v);
    let bd_ad = _mm256_xor_ps(_mm256_mul_ps(swapped, d), neg_re);
    _mm256_add_ps(ac_bc, bd_ad)
}

impl ScalBackend for Avx2Backend {
    #[target_feature(enable = "avx2")]
    unsafe fn scal(alpha: Complex32, x: &mut [Complex32]) {
        let len = x.len();
        let ptr = x.as_mut_ptr() as *mut f32;
        let mut i = 0;

        // Broadcast alpha's parts to all 8 lanes
        let c = _mm256_set1_ps(alpha.re);
        let d = _mm256_set1_ps(alpha.im);
        let neg_re = _mm256_set_ps(0.0, -0.0, 0.0, -0.0, 0.0, -0.0, 0.0, -0.0);

        // Process 8 complex (16 floats, 2 registers) at a time
        while i + GROUP_SIZE <= len {
            let p = ptr.add(2 * i);
            let v0 = _mm256_loadu_ps(p);
            let v1 = _mm256_loadu_ps(p.add(8));
            _mm256_storeu_ps(p, cmul_ps(v0, c, d, neg_re));
            _mm256_storeu_ps(p.add(8), cmul_ps(v1, c, d, neg_re));
            i += GROUP_SIZE;
        }

        // Handle remaining elements
        scal_tail(alpha, &mut x[i..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::ScalarBackend;

    #[test]
    fn test_avx2_matches_scalar_bitwise() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("Skipping AVX2 test: CPU does not support AVX2");
            return;
        }

        let alpha = Complex32::new(-0.6, 0.35);
        for n in 0..=2 * GROUP_SIZE + 5 {
            let mut x: Vec<Complex32> = (0..n)
                .map(|i| Complex32::new(1.5 - 0.2 * i as f32, 0.03 * i as f32))
                .collect();
            let mut y = x.clone();

            unsafe {
                Avx2Backend::scal(alpha, &mut x);
                ScalarBackend::scal(alpha, &mut y);
            }

            for (i, (a, b)) in x.iter().zip(y.iter()).enumerate() {
                assert_eq!(a.re.to_bits(), b.re.to_bits(), "re differs at n={n} i={i}");
                assert_eq!(a.im.to_bits(), b.im.to_bits(), "im differs at n={n} i={i}");
            }
        }
    }

    #[test]
    fn test_avx2_scal_alpha_two() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("Skipping AVX2 test: CPU does not support AVX2");
            return;
        }

        let mut x: Vec<Complex32> = [0.0f32, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0, 8.0]
            .iter()
            .map(|&r| Complex32::new(r, 0.0))
            .collect();

        unsafe {
            Avx2Backend::scal(Complex32::new(2.0, 0.0), &mut x);
        }

        let want: Vec<Complex32> = [0.0f32, 2.0, -4.0, 6.0, 8.0, -10.0, 12.0, -14.0, 16.0]
            .iter()
            .map(|&r| Complex32::new(r, 0.0))
            .collect();
        assert_eq!(x, want);
    }
}
