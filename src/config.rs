//! Harness configuration
//!
//! One [`HarnessConfig`] drives both the alignment sweep and the
//! differential runner.
//!
//! # Examples
//!
//! ```
//! use cscal::HarnessConfig;
//!
//! let config = HarnessConfig::new()
//!     .with_seed(7)
//!     .with_trials(50)
//!     .with_max_len(1000)
//!     .build();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.trials, 50);
//! ```

use crate::guard::ALIGNMENT_PERIOD;
use crate::{CscalError, Result};

/// Configuration for the verification harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Master seed for the differential runner's RNG
    pub seed: u64,
    /// Number of differential trials
    pub trials: u32,
    /// Largest random vector length (lengths are drawn from `1..=max_len`)
    pub max_len: usize,
    /// Alignment offsets the sweep visits
    pub offsets: Vec<usize>,
    /// Guard width on each side of the payload
    pub guard_width: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            trials: 300,
            max_len: 5000,
            offsets: (0..ALIGNMENT_PERIOD).collect(),
            guard_width: 4,
        }
    }
}

impl HarnessConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the master seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of differential trials
    #[must_use]
    pub const fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Set the largest random vector length
    #[must_use]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Set the alignment offsets
    #[must_use]
    pub fn with_offsets(mut self, offsets: Vec<usize>) -> Self {
        self.offsets = offsets;
        self
    }

    /// Set the guard width
    #[must_use]
    pub const fn with_guard_width(mut self, guard_width: usize) -> Self {
        self.guard_width = guard_width;
        self
    }

    /// Finalize configuration (no-op, for builder pattern consistency)
    pub fn build(self) -> Self {
        self
    }

    /// Small preset for fast local runs
    ///
    /// - 32 trials, lengths up to 256
    /// - offsets 0, 1, 3, 7
    pub fn quick() -> Self {
        Self {
            trials: 32,
            max_len: 256,
            offsets: vec![0, 1, 3, 7],
            ..Self::default()
        }
    }

    /// Large preset for CI
    ///
    /// - 1000 trials, lengths up to 20 000
    /// - wider guards (16)
    pub fn thorough() -> Self {
        Self {
            trials: 1000,
            max_len: 20_000,
            guard_width: 16,
            ..Self::default()
        }
    }

    /// Number of (case, offset) runs a sweep over `cases` cases performs
    #[must_use]
    pub fn total_runs(&self, cases: usize) -> usize {
        cases * self.offsets.len()
    }

    /// Reject configurations the harness cannot run
    ///
    /// # Errors
    ///
    /// Returns [`CscalError::InvalidConfig`] for zero trials, zero `max_len`,
    /// zero guard width, no offsets, or an offset outside one alignment
    /// period.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(CscalError::InvalidConfig("trials must be > 0".to_string()));
        }
        if self.max_len == 0 {
            return Err(CscalError::InvalidConfig("max_len must be > 0".to_string()));
        }
        if self.guard_width == 0 {
            return Err(CscalError::InvalidConfig("guard_width must be > 0".to_string()));
        }
        if self.offsets.is_empty() {
            return Err(CscalError::InvalidConfig("offsets must not be empty".to_string()));
        }
        if let Some(bad) = self.offsets.iter().find(|&&o| o >= ALIGNMENT_PERIOD) {
            return Err(CscalError::InvalidConfig(format!(
                "offset {bad} outside alignment period {ALIGNMENT_PERIOD}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.trials, 300);
        assert_eq!(config.max_len, 5000);
        assert_eq!(config.offsets, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(config.guard_width, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HarnessConfig::new()
            .with_seed(1)
            .with_trials(10)
            .with_max_len(64)
            .with_offsets(vec![0, 4])
            .with_guard_width(2)
            .build();
        assert_eq!(config.seed, 1);
        assert_eq!(config.trials, 10);
        assert_eq!(config.max_len, 64);
        assert_eq!(config.offsets, vec![0, 4]);
        assert_eq!(config.guard_width, 2);
    }

    #[test]
    fn test_presets_validate() {
        assert!(HarnessConfig::quick().validate().is_ok());
        assert!(HarnessConfig::thorough().validate().is_ok());
        assert!(HarnessConfig::thorough().trials > HarnessConfig::quick().trials);
    }

    #[test]
    fn test_total_runs() {
        assert_eq!(HarnessConfig::default().total_runs(12), 96);
        assert_eq!(HarnessConfig::quick().total_runs(12), 48);
    }

    #[test]
    fn test_validate_rejects_zero_trials() {
        let err = HarnessConfig::new().with_trials(0).validate().unwrap_err();
        assert_eq!(err, CscalError::InvalidConfig("trials must be > 0".to_string()));
    }

    #[test]
    fn test_validate_rejects_bad_offsets() {
        assert!(HarnessConfig::new().with_offsets(vec![]).validate().is_err());
        let err = HarnessConfig::new().with_offsets(vec![0, 8]).validate().unwrap_err();
        assert_eq!(
            err,
            CscalError::InvalidConfig("offset 8 outside alignment period 8".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        assert!(HarnessConfig::new().with_max_len(0).validate().is_err());
        assert!(HarnessConfig::new().with_guard_width(0).validate().is_err());
    }
}
