//! Scalar (non-SIMD) backend implementation
//!
//! This is the naive per-element reference the other backends are
//! differentially tested against. It deliberately uses the `num-complex`
//! operator rather than [`super::mul_one`], so a bug in the shared formula
//! cannot hide in both sides of a comparison.
//!
//! # Performance
//!
//! No grouping and no SIMD. It is the baseline in the throughput benches.

use num_complex::Complex32;

use super::ScalBackend;

/// Scalar backend (portable, no SIMD)
pub struct ScalarBackend;

impl ScalBackend for ScalarBackend {
    // SAFETY: This function is safe because:
    // 1. All slice accesses go through a bounds-checked iterator
    // 2. No raw pointer arithmetic is performed
    // 3. Marked unsafe only to match ScalBackend trait interface
    unsafe fn scal(alpha: Complex32, x: &mut [Complex32]) {
        for v in x.iter_mut() {
            *v *= alpha;
        }
    }
}
