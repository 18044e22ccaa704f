//! Backend implementations of the complex scale kernel
//!
//! Every backend computes `x[i] := alpha * x[i]` in place with the same
//! single-element formula ([`mul_one`]). Backends differ only in how many
//! elements one iteration of the main loop processes; all of them process
//! [`GROUP_SIZE`] elements per group and finish the remaining
//! `n % GROUP_SIZE` with a scalar tail.
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. The public
//! entry points in [`crate::scal`] remain safe.
//!
//! # Backends
//!
//! - `scalar`: naive per-element reference (no grouping)
//! - `unrolled`: portable grouped loop, no intrinsics
//! - `sse2`: x86_64 baseline SIMD (128-bit, 2 complex per register)
//! - `avx2`: x86_64 256-bit SIMD (4 complex per register)
//! - `neon`: aarch64 SIMD (128-bit, 2 complex per register)

use num_complex::Complex32;

pub mod scalar;
pub mod unrolled;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod avx2;

#[cfg(target_arch = "aarch64")]
pub mod neon;

/// Number of complex elements processed per main-loop iteration
pub const GROUP_SIZE: usize = 8;

/// Backend trait for the complex scale kernel
///
/// # Safety
///
/// Implementations may use unsafe SIMD intrinsics. Callers must ensure the
/// CPU supports the instruction set the implementation was compiled for.
pub trait ScalBackend {
    /// In-place scale: x[i] = alpha * x[i]
    ///
    /// # Safety
    ///
    /// - The target CPU must support the backend's instruction set
    unsafe fn scal(alpha: Complex32, x: &mut [Complex32]);
}

/// Single-element complex multiply shared by every group and tail path.
///
/// `(a+bi)(c+di) = (ac - bd) + (ad + bc)i`. SIMD paths reproduce exactly
/// these products and sums (no fused multiply-add) so that all backends are
/// bit-identical.
#[inline(always)]
pub(crate) fn mul_one(alpha: Complex32, v: Complex32) -> Complex32 {
    Complex32::new(
        v.re * alpha.re - v.im * alpha.im,
        v.re * alpha.im + v.im * alpha.re,
    )
}

/// Scalar tail shared by the grouped backends.
#[inline(always)]
pub(crate) fn scal_tail(alpha: Complex32, tail: &mut [Complex32]) {
    for v in tail {
        *v = mul_one(alpha, *v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_one_formula() {
        let alpha = Complex32::new(3.0, -4.0);
        assert_eq!(mul_one(alpha, Complex32::new(1.0, 0.0)), Complex32::new(3.0, -4.0));
        assert_eq!(mul_one(alpha, Complex32::new(0.0, 1.0)), Complex32::new(4.0, 3.0));
        assert_eq!(mul_one(alpha, Complex32::new(-2.0, 0.0)), Complex32::new(-6.0, 8.0));
    }

    #[test]
    fn test_mul_one_matches_num_complex() {
        let alpha = Complex32::new(0.3, 0.7);
        let v = Complex32::new(-1.25, 2.5);
        let want = v * alpha;
        let got = mul_one(alpha, v);
        assert_eq!(got.re.to_bits(), want.re.to_bits());
        assert_eq!(got.im.to_bits(), want.im.to_bits());
    }

    #[test]
    fn test_scal_tail_handles_empty() {
        let mut x: [Complex32; 0] = [];
        scal_tail(Complex32::new(2.0, 0.0), &mut x);
        assert!(x.is_empty());
    }
}
