//! Benchmark fixture
//!
//! One vector sized for the longest benchmark length is allocated up front
//! and every benchmark case scales a prefix of it, so timings exclude
//! allocation. The fixture is an explicit value handed to each case; there
//! is no process-wide state.
//!
//! The fixture's `alpha` has unit modulus, so millions of in-place scalings
//! keep the data away from subnormals and infinity. [`BenchFixture::reset`]
//! restores the initial contents between benchmark groups.

use num_complex::Complex32;
use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::differential::random_vector;

/// Geometric progression of vector lengths the benchmarks time
pub const BENCH_LENGTHS: [usize; 10] = [1, 3, 10, 30, 100, 300, 10_000, 30_000, 100_000, 300_000];

/// Pre-allocated benchmark data shared across length sub-slices
#[derive(Debug, Clone)]
pub struct BenchFixture {
    data: Vec<Complex32>,
    pristine: Vec<Complex32>,
    alpha: Complex32,
}

impl BenchFixture {
    /// Fixture sized for the largest entry of [`BENCH_LENGTHS`]
    ///
    /// # Examples
    ///
    /// ```
    /// use cscal::{BenchFixture, BENCH_LENGTHS};
    ///
    /// let mut fixture = BenchFixture::new(42);
    /// assert_eq!(fixture.max_len(), 300_000);
    /// assert_eq!(fixture.slice_mut(BENCH_LENGTHS[2]).len(), 10);
    /// ```
    pub fn new(seed: u64) -> Self {
        let max = BENCH_LENGTHS.iter().copied().max().unwrap_or(0);
        Self::with_len(seed, max)
    }

    /// Fixture of an explicit size
    pub fn with_len(seed: u64, len: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = random_vector(&mut rng, len);
        let alpha = Complex32::from_polar(1.0, rng.gen_range(0.0..TAU));
        Self {
            pristine: data.clone(),
            data,
            alpha,
        }
    }

    /// Scalar used by every case
    pub fn alpha(&self) -> Complex32 {
        self.alpha
    }

    /// Length of the backing vector
    pub fn max_len(&self) -> usize {
        self.data.len()
    }

    /// Prefix of the backing vector, clamped to `max_len()`
    pub fn slice_mut(&mut self, len: usize) -> &mut [Complex32] {
        let len = len.min(self.data.len());
        &mut self.data[..len]
    }

    /// Scalar and prefix together, for `bencher.iter` closures
    pub fn split(&mut self, len: usize) -> (Complex32, &mut [Complex32]) {
        let alpha = self.alpha;
        (alpha, self.slice_mut(len))
    }

    /// Restore the backing vector to its initial contents without reallocating
    pub fn reset(&mut self) {
        self.data.copy_from_slice(&self.pristine);
    }
}
