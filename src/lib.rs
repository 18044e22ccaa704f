//! cscal: In-Place Complex Vector Scaling
//!
//! **cscal** provides the Level-1 primitive `x[i] := alpha * x[i]` over a
//! contiguous slice of single-precision complex numbers, with hand-written
//! SIMD backends and the harness that certifies them:
//!
//! 1. **Kernel** - grouped main loop (8 elements) plus scalar tail, one shared
//!    single-element formula on every path
//! 2. **Guarded buffers** - sentinel padding that exposes out-of-bounds writes
//! 3. **Alignment sweep** - every payload position within a 64-byte chunk
//! 4. **Differential testing** - seeded random trials against a naive reference
//! 5. **Benchmark fixture** - one pre-allocated vector for throughput runs
//!
//! # Quick Start
//!
//! ```rust
//! use cscal::{scal_unitary, Complex32};
//!
//! let mut x = vec![Complex32::new(1.0, 0.0), Complex32::new(-2.0, 0.0)];
//! scal_unitary(Complex32::new(2.0, 0.0), &mut x);
//! assert_eq!(x, vec![Complex32::new(2.0, 0.0), Complex32::new(-4.0, 0.0)]);
//! ```

pub mod backends;
pub mod config;
pub mod differential;
pub mod error;
pub mod fixture;
pub mod guard;
pub mod scal;
pub mod sweep;

pub use config::HarnessConfig;
pub use differential::{DifferentialReport, DifferentialRunner, TrialReport};
pub use error::{CaseLabel, CscalError, Failure, Result};
pub use fixture::{BenchFixture, BENCH_LENGTHS};
pub use guard::{is_valid_guard, GuardedBuffer, GUARD_SENTINEL};
pub use num_complex::Complex32;
pub use scal::{same, scal_naive, scal_unitary, scal_unitary_with_backend};
pub use sweep::{scal_cases, AlignmentSweep, CaseReport, ScalCase};

/// Backend execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Naive per-element reference (no grouping)
    Scalar,
    /// Portable grouped loop (compiler auto-vectorization)
    Unrolled,
    /// SSE2 (x86_64 baseline)
    SSE2,
    /// AVX2 (256-bit)
    AVX2,
    /// ARM NEON
    NEON,
    /// Auto-select best available
    Auto,
}

impl Backend {
    /// Select the best available backend for the current platform
    ///
    /// This is a convenience wrapper around `select_best_available_backend()`
    pub fn select_best() -> Self {
        select_best_available_backend()
    }

    /// Whether this backend can run on the current CPU
    ///
    /// `Auto` is always available since it resolves at call time.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar | Backend::Unrolled | Backend::Auto => true,
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX2 => is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "aarch64")]
            Backend::NEON => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}

/// Every concrete backend runnable on this CPU, reference first
///
/// # Examples
///
/// ```
/// use cscal::{available_backends, Backend};
///
/// let backends = available_backends();
/// assert_eq!(backends[0], Backend::Scalar);
/// assert!(backends.contains(&Backend::Unrolled));
/// ```
pub fn available_backends() -> Vec<Backend> {
    [
        Backend::Scalar,
        Backend::Unrolled,
        Backend::SSE2,
        Backend::AVX2,
        Backend::NEON,
    ]
    .into_iter()
    .filter(|b| b.is_available())
    .collect()
}

/// Detect best SIMD backend for x86_64 platforms
#[cfg(target_arch = "x86_64")]
fn detect_x86_backend() -> Backend {
    if is_x86_feature_detected!("avx2") {
        return Backend::AVX2;
    }
    if is_x86_feature_detected!("sse2") {
        return Backend::SSE2;
    }
    Backend::Unrolled
}

/// Select the best available backend for the current platform
///
/// This function performs runtime CPU feature detection and selects the most
/// optimized backend available. The selection follows this priority:
///
/// **x86_64**:
/// 1. AVX2 (if `avx2` feature detected)
/// 2. SSE2 (baseline for x86_64)
///
/// **aarch64**: NEON
///
/// **Other platforms**: Unrolled
///
/// # Examples
///
/// ```
/// use cscal::{select_best_available_backend, Backend};
///
/// let backend = select_best_available_backend();
/// assert_ne!(backend, Backend::Auto);
/// assert!(backend.is_available());
/// ```
pub fn select_best_available_backend() -> Backend {
    #[cfg(target_arch = "x86_64")]
    {
        detect_x86_backend()
    }

    #[cfg(target_arch = "aarch64")]
    {
        Backend::NEON
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        Backend::Unrolled
    }
}
