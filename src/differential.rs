//! Randomized differential testing
//!
//! Each trial draws a random length, a random `alpha` and a random vector,
//! runs the kernel under test on one copy and the naive reference on
//! another, and counts the indices where they differ. Random lengths sweep
//! every `n % GROUP_SIZE` remainder class across a few hundred trials, which
//! is where off-by-one errors in tail loops show up.
//!
//! The RNG is injected, so a failing run reproduces from its seed.
//!
//! # Examples
//!
//! ```
//! use cscal::{scal_unitary, DifferentialRunner, HarnessConfig};
//!
//! let config = HarnessConfig::new().with_seed(3).with_trials(20).with_max_len(100);
//! let mut runner = DifferentialRunner::new(config);
//! let report = runner.run(scal_unitary).unwrap();
//! assert!(report.passed());
//! assert_eq!(report.trials.len(), 20);
//! ```

use std::fmt;

use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::backends::GROUP_SIZE;
use crate::{same, scal_naive, HarnessConfig, Result};

/// Random complex value with both components in `[0, 1)`
pub fn random_complex<R: Rng>(rng: &mut R) -> Complex32 {
    Complex32::new(rng.gen::<f32>(), rng.gen::<f32>())
}

/// Random vector of `n` complex values with components in `[0, 1)`
pub fn random_vector<R: Rng>(rng: &mut R, n: usize) -> Vec<Complex32> {
    (0..n).map(|_| random_complex(rng)).collect()
}

/// Outcome of one differential trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialReport {
    /// Trial number
    pub trial: u32,
    /// Vector length drawn for this trial
    pub len: usize,
    /// Scalar drawn for this trial
    pub alpha: Complex32,
    /// Number of indices where kernel and reference differ
    pub mismatches: usize,
    /// First differing index, if any
    pub first_mismatch: Option<usize>,
}

impl TrialReport {
    /// Whether the kernel matched the reference everywhere
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    /// Fraction of the vector that mismatched
    #[must_use]
    pub fn mismatch_fraction(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.mismatches as f64 / self.len as f64
        }
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}: diff {}", self.trial, self.len, self.mismatch_fraction())
    }
}

/// Outcome of a full differential run
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialReport {
    /// Seed the run was configured with
    pub seed: u64,
    /// Per-trial results, in order
    pub trials: Vec<TrialReport>,
}

impl DifferentialReport {
    /// Whether every trial had zero mismatches
    #[must_use]
    pub fn passed(&self) -> bool {
        self.trials.iter().all(TrialReport::passed)
    }

    /// Trials with at least one mismatch
    pub fn failures(&self) -> impl Iterator<Item = &TrialReport> {
        self.trials.iter().filter(|t| !t.passed())
    }

    /// Number of failing trials
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// How many trials landed in each `len % GROUP_SIZE` class
    #[must_use]
    pub fn remainder_histogram(&self) -> [usize; GROUP_SIZE] {
        let mut histogram = [0; GROUP_SIZE];
        for t in &self.trials {
            histogram[t.len % GROUP_SIZE] += 1;
        }
        histogram
    }

    /// Whether every remainder class was sampled at least once
    #[must_use]
    pub fn covers_all_remainders(&self) -> bool {
        self.remainder_histogram().iter().all(|&count| count > 0)
    }
}

/// Seeded differential runner
#[derive(Debug, Clone)]
pub struct DifferentialRunner<R = StdRng> {
    rng: R,
    config: HarnessConfig,
}

impl DifferentialRunner<StdRng> {
    /// Runner with a `StdRng` seeded from `config.seed`
    pub fn new(config: HarnessConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { rng, config }
    }
}

impl<R: Rng> DifferentialRunner<R> {
    /// Runner with a caller-provided RNG
    pub fn with_rng(config: HarnessConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// Configuration in use
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Compare `kernel` against the naive reference for every trial
    ///
    /// # Errors
    ///
    /// Returns [`crate::CscalError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn run<F>(&mut self, kernel: F) -> Result<DifferentialReport>
    where
        F: FnMut(Complex32, &mut [Complex32]),
    {
        self.run_against(kernel, scal_naive)
    }

    /// Compare `kernel` against an arbitrary `reference`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CscalError::InvalidConfig`] if the configuration does
    /// not validate.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip_all, fields(seed = self.config.seed, trials = self.config.trials))
    )]
    pub fn run_against<F, G>(&mut self, mut kernel: F, mut reference: G) -> Result<DifferentialReport>
    where
        F: FnMut(Complex32, &mut [Complex32]),
        G: FnMut(Complex32, &mut [Complex32]),
    {
        self.config.validate()?;

        let mut trials = Vec::with_capacity(self.config.trials as usize);
        for trial in 0..self.config.trials {
            let report = self.run_trial(trial, &mut kernel, &mut reference);
            if !report.passed() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    trial = report.trial,
                    len = report.len,
                    mismatches = report.mismatches,
                    "kernel diverged from reference"
                );
            }
            trials.push(report);
        }

        Ok(DifferentialReport {
            seed: self.config.seed,
            trials,
        })
    }

    fn run_trial<F, G>(&mut self, trial: u32, kernel: &mut F, reference: &mut G) -> TrialReport
    where
        F: FnMut(Complex32, &mut [Complex32]),
        G: FnMut(Complex32, &mut [Complex32]),
    {
        let len = self.rng.gen_range(1..=self.config.max_len);
        let mut x = random_vector(&mut self.rng, len);
        let mut y = x.clone();
        let alpha = random_complex(&mut self.rng);

        kernel(alpha, &mut x);
        reference(alpha, &mut y);

        let mut mismatches = 0;
        let mut first_mismatch = None;
        for (i, (a, b)) in x.iter().zip(y.iter()).enumerate() {
            if !same(*a, *b) {
                mismatches += 1;
                first_mismatch.get_or_insert(i);
            }
        }

        TrialReport {
            trial,
            len,
            alpha,
            mismatches,
            first_mismatch,
        }
    }
}
