//! Complex scale kernel entry points
//!
//! [`scal_unitary`] is the unit-stride kernel: `x[i] := alpha * x[i]` for
//! every `i`, in place. It never allocates, never changes `x.len()`, and has
//! no error conditions; NaN and infinity propagate per IEEE 754. `alpha`
//! values such as 0, 1 or pure-imaginary numbers take the same code path as
//! any other scalar.

use num_complex::Complex32;

use crate::backends::scalar::ScalarBackend;
use crate::backends::unrolled::UnrolledBackend;
use crate::backends::ScalBackend;
use crate::{Backend, CscalError, Result};

#[cfg(target_arch = "x86_64")]
use crate::backends::{avx2::Avx2Backend, sse2::Sse2Backend};

#[cfg(target_arch = "aarch64")]
use crate::backends::neon::NeonBackend;

/// Scale `x` in place by `alpha` using the best backend for this CPU
///
/// # Examples
///
/// ```
/// use cscal::{scal_unitary, Complex32};
///
/// let mut x = vec![Complex32::new(1.0, 0.0)];
/// scal_unitary(Complex32::new(1.0, 1.0), &mut x);
/// assert_eq!(x, vec![Complex32::new(1.0, 1.0)]);
///
/// let mut empty: Vec<Complex32> = vec![];
/// scal_unitary(Complex32::new(0.0, 0.0), &mut empty);
/// assert!(empty.is_empty());
/// ```
#[inline]
pub fn scal_unitary(alpha: Complex32, x: &mut [Complex32]) {
    // select_best_available_backend only returns backends the CPU supports
    dispatch(crate::select_best_available_backend(), alpha, x);
}

/// Scale `x` in place by `alpha` with an explicit backend
///
/// `Backend::Auto` resolves to the best available backend.
///
/// # Examples
///
/// ```
/// use cscal::{scal_unitary_with_backend, Backend, Complex32};
///
/// let mut x = vec![Complex32::new(1.0, -2.0); 9];
/// scal_unitary_with_backend(Backend::Unrolled, Complex32::new(2.0, 0.0), &mut x).unwrap();
/// assert!(x.iter().all(|v| *v == Complex32::new(2.0, -4.0)));
/// ```
///
/// # Errors
///
/// Returns [`CscalError::UnsupportedBackend`] if the CPU lacks the backend's
/// instruction set (or the backend does not exist for this architecture).
pub fn scal_unitary_with_backend(backend: Backend, alpha: Complex32, x: &mut [Complex32]) -> Result<()> {
    let resolved = match backend {
        Backend::Auto => crate::select_best_available_backend(),
        other => other,
    };

    if !resolved.is_available() {
        return Err(CscalError::UnsupportedBackend(resolved));
    }

    dispatch(resolved, alpha, x);
    Ok(())
}

/// Naive per-element reference: `x[i] *= alpha`
///
/// This is what every optimized backend is compared against.
pub fn scal_naive(alpha: Complex32, x: &mut [Complex32]) {
    // SAFETY: the scalar backend uses no intrinsics
    unsafe { ScalarBackend::scal(alpha, x) }
}

/// Exact comparison used by the harness
///
/// Per component: identical bit pattern, or both NaN. No epsilon; signed
/// zeros are distinguished.
///
/// # Examples
///
/// ```
/// use cscal::{same, Complex32};
///
/// assert!(same(Complex32::new(1.0, 2.0), Complex32::new(1.0, 2.0)));
/// assert!(same(Complex32::new(f32::NAN, 0.0), Complex32::new(f32::NAN, 0.0)));
/// assert!(!same(Complex32::new(0.0, 0.0), Complex32::new(-0.0, 0.0)));
/// ```
#[must_use]
pub fn same(a: Complex32, b: Complex32) -> bool {
    same_f32(a.re, b.re) && same_f32(a.im, b.im)
}

fn same_f32(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

/// Run a backend the caller has already checked is available.
#[inline]
fn dispatch(backend: Backend, alpha: Complex32, x: &mut [Complex32]) {
    // SAFETY: callers only pass backends whose instruction set is present
    unsafe {
        match backend {
            Backend::Scalar => ScalarBackend::scal(alpha, x),
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 => Sse2Backend::scal(alpha, x),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX2 => Avx2Backend::scal(alpha, x),
            #[cfg(target_arch = "aarch64")]
            Backend::NEON => NeonBackend::scal(alpha, x),
            // Unrolled, Auto and backends absent on this architecture
            _ => UnrolledBackend::scal(alpha, x),
        }
    }
}
