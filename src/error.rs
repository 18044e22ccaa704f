//! Error and failure types for cscal
//!
//! The kernel itself never fails. [`CscalError`] covers the surrounding API
//! (explicit backend selection, harness configuration). [`Failure`] is what
//! the verification harness accumulates: it is a report, not an abort.

use std::fmt;

use num_complex::Complex32;
use thiserror::Error;

use crate::Backend;

/// Result type for cscal operations
pub type Result<T> = std::result::Result<T, CscalError>;

/// Errors that can occur outside the kernel hot path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CscalError {
    /// Backend not supported on this platform
    #[error("Backend not supported on this platform: {0:?}")]
    UnsupportedBackend(Backend),

    /// Harness configuration rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Size mismatch between operands
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },
}

/// Identifies one (case, alignment offset) run in a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseLabel {
    /// Index of the case in its table
    pub case: usize,
    /// Alignment offset the payload was placed at
    pub offset: usize,
}

impl CaseLabel {
    /// Create a label
    #[must_use]
    pub const fn new(case: usize, offset: usize) -> Self {
        Self { case, offset }
    }
}

impl fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test {} (x:{})", self.case, self.offset)
    }
}

/// A single verification failure
///
/// Failures are accumulated per case; none of them stops a sweep.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Failure {
    /// An output element differs from the expected value
    #[error("{label}: unexpected value at {index}: got: {got} want: {want}")]
    ValueMismatch {
        /// Case and offset
        label: CaseLabel,
        /// Index into the payload
        index: usize,
        /// Value the kernel produced
        got: Complex32,
        /// Value the case expected
        want: Complex32,
    },

    /// A sentinel in a guard region was overwritten
    #[error("{label}: guard violated in x vector {leading:?} {trailing:?}")]
    GuardViolation {
        /// Case and offset
        label: CaseLabel,
        /// Full contents of the leading guard after the call
        leading: Vec<Complex32>,
        /// Full contents of the trailing guard after the call
        trailing: Vec<Complex32>,
    },

    /// The kernel changed the payload length
    #[error("{label}: length changed: got {got} want {want}")]
    LengthMismatch {
        /// Case and offset
        label: CaseLabel,
        /// Payload length after the call
        got: usize,
        /// Expected length
        want: usize,
    },
}

impl Failure {
    /// Label of the run that produced this failure
    #[must_use]
    pub fn label(&self) -> CaseLabel {
        match self {
            Self::ValueMismatch { label, .. }
            | Self::GuardViolation { label, .. }
            | Self::LengthMismatch { label, .. } => *label,
        }
    }

    /// Whether the failure implies an out-of-bounds access
    #[must_use]
    pub fn is_memory_fault(&self) -> bool {
        matches!(self, Self::GuardViolation { .. })
    }
}
