//! Portable grouped backend
//!
//! Processes [`GROUP_SIZE`] elements per iteration with no cross-element
//! dependency inside a group, leaving vectorization to the compiler. Used on
//! targets without a hand-written SIMD backend.

use num_complex::Complex32;

use super::{mul_one, scal_tail, ScalBackend, GROUP_SIZE};

/// Unrolled backend (portable, auto-vectorized)
pub struct UnrolledBackend;

impl ScalBackend for UnrolledBackend {
    // SAFETY: This function is safe because:
    // 1. Groups come from chunks_exact_mut, so every index is in bounds
    // 2. No raw pointer arithmetic is performed
    // 3. Marked unsafe only to match ScalBackend trait interface
    unsafe fn scal(alpha: Complex32, x: &mut [Complex32]) {
        let mut groups = x.chunks_exact_mut(GROUP_SIZE);

        for g in &mut groups {
            g[0] = mul_one(alpha, g[0]);
            g[1] = mul_one(alpha, g[1]);
            g[2] = mul_one(alpha, g[2]);
            g[3] = mul_one(alpha, g[3]);
            g[4] = mul_one(alpha, g[4]);
            g[5] = mul_one(alpha, g[5]);
            g[6] = mul_one(alpha, g[6]);
            g[7] = mul_one(alpha, g[7]);
        }

        // Handle remaining elements
        scal_tail(alpha, groups.into_remainder());
    }
}
