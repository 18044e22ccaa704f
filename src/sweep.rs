//! Alignment sweep over the fixed case table
//!
//! For one [`ScalCase`], the sweep runs at every configured alignment offset:
//! build a [`GuardedBuffer`] → run the kernel on the payload → compare every
//! element against the expected output → validate both guards. Every offset
//! runs regardless of earlier failures and all failures are collected into a
//! [`CaseReport`].
//!
//! # Examples
//!
//! ```
//! use cscal::{scal_cases, scal_unitary, AlignmentSweep, HarnessConfig};
//!
//! let sweep = AlignmentSweep::new(&HarnessConfig::default()).unwrap();
//! for report in sweep.run_table(&scal_cases(), scal_unitary) {
//!     assert!(report.passed(), "{:?}", report.failures);
//! }
//! ```

use num_complex::Complex32;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{CaseLabel, Failure};
use crate::guard::{GuardedBuffer, GUARD_SENTINEL};
use crate::{same, CscalError, HarnessConfig, Result};

/// One hand-picked test case: `want = alpha * x`, exactly representable
#[derive(Debug, Clone, PartialEq)]
pub struct ScalCase {
    /// Scalar
    pub alpha: Complex32,
    /// Input vector
    pub x: Vec<Complex32>,
    /// Expected output
    pub want: Vec<Complex32>,
}

impl ScalCase {
    /// Create a case
    pub fn new(alpha: Complex32, x: Vec<Complex32>, want: Vec<Complex32>) -> Self {
        Self { alpha, x, want }
    }

    /// Create a case, rejecting input and expected vectors of different lengths
    pub fn try_new(alpha: Complex32, x: Vec<Complex32>, want: Vec<Complex32>) -> Result<Self> {
        if x.len() != want.len() {
            return Err(CscalError::SizeMismatch {
                expected: x.len(),
                actual: want.len(),
            });
        }
        Ok(Self::new(alpha, x, want))
    }
}

fn c(re: f32, im: f32) -> Complex32 {
    Complex32::new(re, im)
}

fn reals(values: &[f32]) -> Vec<Complex32> {
    values.iter().map(|&r| c(r, 0.0)).collect()
}

/// The fixed case table
///
/// Lengths 0 through 11 cover both sides of a group boundary; every input
/// and output is exactly representable in `f32`.
pub fn scal_cases() -> Vec<ScalCase> {
    let two = c(2.0, 0.0);
    let three_minus_four_i = c(3.0, -4.0);
    let rotated = vec![
        c(0.0, 0.0),
        c(3.0, -4.0),
        c(-6.0, 8.0),
        c(9.0, -12.0),
        c(12.0, -16.0),
        c(-15.0, 20.0),
        c(18.0, -24.0),
        c(-21.0, 28.0),
        c(24.0, -32.0),
        c(27.0, -36.0),
        c(36.0, -48.0),
    ];

    vec![
        ScalCase::new(c(0.0, 0.0), vec![], vec![]),
        ScalCase::new(c(1.0, 1.0), reals(&[1.0]), vec![c(1.0, 1.0)]),
        ScalCase::new(c(0.0, -1.0), reals(&[1.0]), vec![c(0.0, -1.0)]),
        ScalCase::new(two, reals(&[1.0, -2.0]), reals(&[2.0, -4.0])),
        ScalCase::new(two, reals(&[1.0, -2.0, 3.0]), reals(&[2.0, -4.0, 6.0])),
        ScalCase::new(two, reals(&[1.0, -2.0, 3.0, 4.0]), reals(&[2.0, -4.0, 6.0, 8.0])),
        ScalCase::new(
            two,
            reals(&[1.0, -2.0, 3.0, 4.0, -5.0]),
            reals(&[2.0, -4.0, 6.0, 8.0, -10.0]),
        ),
        ScalCase::new(
            two,
            reals(&[0.0, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0]),
            reals(&[0.0, 2.0, -4.0, 6.0, 8.0, -10.0, 12.0, -14.0]),
        ),
        ScalCase::new(
            two,
            reals(&[0.0, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0, 8.0]),
            reals(&[0.0, 2.0, -4.0, 6.0, 8.0, -10.0, 12.0, -14.0, 16.0]),
        ),
        ScalCase::new(
            two,
            reals(&[0.0, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0, 8.0, 9.0]),
            reals(&[0.0, 2.0, -4.0, 6.0, 8.0, -10.0, 12.0, -14.0, 16.0, 18.0]),
        ),
        ScalCase::new(
            three_minus_four_i,
            reals(&[0.0, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0, 8.0, 9.0, 12.0]),
            rotated.clone(),
        ),
        ScalCase::new(
            three_minus_four_i,
            reals(&[0.0, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0, 8.0, 9.0]),
            rotated[..10].to_vec(),
        ),
    ]
}

/// Result of sweeping one case across all offsets
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    /// Index of the case in its table
    pub case: usize,
    /// Offsets that were run
    pub offsets: Vec<usize>,
    /// Every failure, in the order found
    pub failures: Vec<Failure>,
}

impl CaseReport {
    /// Whether every offset passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Offsets with at least one failure, deduplicated, in sweep order
    #[must_use]
    pub fn failed_offsets(&self) -> Vec<usize> {
        let mut offsets: Vec<usize> = Vec::new();
        for f in &self.failures {
            let offset = f.label().offset;
            if !offsets.contains(&offset) {
                offsets.push(offset);
            }
        }
        offsets
    }

    /// Whether any failure implies an out-of-bounds write
    #[must_use]
    pub fn has_memory_fault(&self) -> bool {
        self.failures.iter().any(Failure::is_memory_fault)
    }
}

/// Drives a kernel across alignment offsets with guarded buffers
#[derive(Debug, Clone)]
pub struct AlignmentSweep {
    offsets: Vec<usize>,
    guard_width: usize,
    sentinel: Complex32,
}

impl AlignmentSweep {
    /// Sweep using the offsets and guard width of `config`
    ///
    /// # Errors
    ///
    /// Returns [`CscalError::InvalidConfig`] if `config` does not validate;
    /// an empty offset list or zero-width guards would check nothing.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            offsets: config.offsets.clone(),
            guard_width: config.guard_width,
            sentinel: GUARD_SENTINEL,
        })
    }

    /// Use a different sentinel value for the guards
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: Complex32) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Offsets this sweep visits
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Run one case at every offset
    #[cfg_attr(
        feature = "tracing",
        instrument(skip(self, case, kernel), fields(len = case.x.len(), offsets = self.offsets.len()))
    )]
    pub fn run<F>(&self, case_index: usize, case: &ScalCase, mut kernel: F) -> CaseReport
    where
        F: FnMut(Complex32, &mut [Complex32]),
    {
        let mut failures = Vec::new();

        for &offset in &self.offsets {
            let label = CaseLabel::new(case_index, offset);
            let mut buf = GuardedBuffer::with_sentinel(&case.x, self.guard_width, offset, self.sentinel);

            kernel(case.alpha, buf.payload_mut());

            let x = buf.payload();
            if x.len() != case.want.len() {
                failures.push(Failure::LengthMismatch {
                    label,
                    got: x.len(),
                    want: case.want.len(),
                });
            }
            for (index, (&got, &want)) in x.iter().zip(case.want.iter()).enumerate() {
                if !same(got, want) {
                    failures.push(Failure::ValueMismatch {
                        label,
                        index,
                        got,
                        want,
                    });
                }
            }
            if let Err(violation) = buf.validate(label) {
                failures.push(violation);
            }
        }

        #[cfg(feature = "tracing")]
        for failure in &failures {
            tracing::warn!(%failure, "sweep failure");
        }

        CaseReport {
            case: case_index,
            offsets: self.offsets.clone(),
            failures,
        }
    }

    /// Run every case of `cases`, one report per case
    pub fn run_table<F>(&self, cases: &[ScalCase], mut kernel: F) -> Vec<CaseReport>
    where
        F: FnMut(Complex32, &mut [Complex32]),
    {
        cases
            .iter()
            .enumerate()
            .map(|(i, case)| self.run(i, case, &mut kernel))
            .collect()
    }
}
