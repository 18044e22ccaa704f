//! Guard-banded buffers for overrun detection
//!
//! A [`GuardedBuffer`] lays a payload out between two sentinel-filled guard
//! regions of equal width:
//!
//! ```text
//! [slack][leading guard: k][payload: n][trailing guard: k]
//! ```
//!
//! A kernel handed only the payload must leave both guards bit-for-bit
//! unchanged. The slack prefix sits outside the guarded region; its length
//! is chosen so the payload's first element lands at a requested position
//! within a 64-byte chunk, which is how the alignment sweep reaches every
//! alignment class without changing the guard width.
//!
//! A kernel that writes exactly the sentinel value into a guard goes
//! unnoticed. [`GuardedBuffer::with_sentinel`] lets a second run use a
//! different value.

use std::mem::size_of;

use num_complex::Complex32;

use crate::error::{CaseLabel, Failure};

/// Default sentinel: unlikely to arise from arithmetic on test data
pub const GUARD_SENTINEL: Complex32 = Complex32::new(-0.5, 0.0);

/// Number of distinct element positions within one alignment chunk
pub const ALIGNMENT_PERIOD: usize = CHUNK_BYTES / size_of::<Complex32>();

/// Width of the memory chunk alignment classes are measured against
const CHUNK_BYTES: usize = 64;

/// Sentinel-padded backing buffer with a payload view
#[derive(Debug, Clone)]
pub struct GuardedBuffer {
    data: Vec<Complex32>,
    slack: usize,
    guard: usize,
    len: usize,
    sentinel: Complex32,
}

impl GuardedBuffer {
    /// Build a buffer of `2k + n` elements with `src` in the middle
    ///
    /// # Examples
    ///
    /// ```
    /// use cscal::{GuardedBuffer, Complex32, GUARD_SENTINEL};
    ///
    /// let src = [Complex32::new(1.0, 0.0), Complex32::new(2.0, 0.0)];
    /// let buf = GuardedBuffer::new(&src, 4);
    /// assert_eq!(buf.as_slice().len(), 10);
    /// assert_eq!(buf.payload(), &src);
    /// assert!(buf.leading_guard().iter().all(|v| *v == GUARD_SENTINEL));
    /// assert!(buf.is_intact());
    /// ```
    pub fn new(src: &[Complex32], guard: usize) -> Self {
        Self::build(src, guard, None, GUARD_SENTINEL)
    }

    /// Build a buffer whose payload starts at element position `offset`
    /// (mod [`ALIGNMENT_PERIOD`]) within a 64-byte chunk
    pub fn with_offset(src: &[Complex32], guard: usize, offset: usize) -> Self {
        Self::build(src, guard, Some(offset), GUARD_SENTINEL)
    }

    /// Same as [`GuardedBuffer::with_offset`] with a caller-chosen sentinel
    pub fn with_sentinel(src: &[Complex32], guard: usize, offset: usize, sentinel: Complex32) -> Self {
        Self::build(src, guard, Some(offset), sentinel)
    }

    fn build(src: &[Complex32], guard: usize, offset: Option<usize>, sentinel: Complex32) -> Self {
        let len = src.len();
        let mut data: Vec<Complex32> = Vec::with_capacity(ALIGNMENT_PERIOD + 2 * guard + len);

        let slack = match offset {
            Some(offset) => slack_for(data.as_ptr() as usize, guard, offset),
            None => 0,
        };

        // Fits in the reserved capacity, so the base address stays put
        data.resize(slack + 2 * guard + len, sentinel);
        let start = slack + guard;
        data[start..start + len].copy_from_slice(src);

        Self {
            data,
            slack,
            guard,
            len,
            sentinel,
        }
    }

    /// Full guarded region: leading guard, payload, trailing guard
    pub fn as_slice(&self) -> &[Complex32] {
        &self.data[self.slack..]
    }

    /// Payload view
    pub fn payload(&self) -> &[Complex32] {
        let start = self.slack + self.guard;
        &self.data[start..start + self.len]
    }

    /// Mutable payload view, the only part a kernel may touch
    pub fn payload_mut(&mut self) -> &mut [Complex32] {
        let start = self.slack + self.guard;
        &mut self.data[start..start + self.len]
    }

    /// Leading guard region (exactly `guard_width()` elements)
    pub fn leading_guard(&self) -> &[Complex32] {
        &self.as_slice()[..self.guard]
    }

    /// Trailing guard region (exactly `guard_width()` elements)
    pub fn trailing_guard(&self) -> &[Complex32] {
        let full = self.as_slice();
        &full[full.len() - self.guard..]
    }

    /// Guard width `k`
    pub fn guard_width(&self) -> usize {
        self.guard
    }

    /// Sentinel the guards were filled with
    pub fn sentinel(&self) -> Complex32 {
        self.sentinel
    }

    /// Position of the payload's first element within its 64-byte chunk
    pub fn alignment_class(&self) -> usize {
        let addr = self.payload().as_ptr() as usize;
        (addr % CHUNK_BYTES) / size_of::<Complex32>()
    }

    /// Whether both guards still hold the sentinel bit for bit
    pub fn is_intact(&self) -> bool {
        is_valid_guard(self.as_slice(), self.sentinel, self.guard)
    }

    /// Check guard integrity, reporting both regions on violation
    ///
    /// # Errors
    ///
    /// Returns [`Failure::GuardViolation`] with the full contents of both
    /// guards if any sentinel was overwritten.
    pub fn validate(&self, label: CaseLabel) -> Result<(), Failure> {
        if self.is_intact() {
            return Ok(());
        }
        Err(Failure::GuardViolation {
            label,
            leading: self.leading_guard().to_vec(),
            trailing: self.trailing_guard().to_vec(),
        })
    }

    /// Full guarded region, writable; lets tests simulate an overrun
    #[cfg(test)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Complex32] {
        &mut self.data[self.slack..]
    }
}

/// Elements of slack that put the payload at element position `offset`
/// within a chunk, given the backing allocation starts at address `base`
///
/// Positions are counted in whole elements, so a base that is only 4-byte
/// aligned still reaches every class.
fn slack_for(base: usize, guard: usize, offset: usize) -> usize {
    let natural = ((base + guard * size_of::<Complex32>()) % CHUNK_BYTES) / size_of::<Complex32>();
    (offset % ALIGNMENT_PERIOD + ALIGNMENT_PERIOD - natural) % ALIGNMENT_PERIOD
}

/// Check that the first and last `guard` elements of `buf` equal `sentinel`
///
/// Comparison is on bit patterns. A buffer shorter than `2 * guard` cannot
/// hold two guards and is reported invalid.
///
/// # Examples
///
/// ```
/// use cscal::{is_valid_guard, Complex32, GUARD_SENTINEL};
///
/// let mut buf = vec![GUARD_SENTINEL; 6];
/// buf[2] = Complex32::new(1.0, 0.0);
/// buf[3] = Complex32::new(2.0, 0.0);
/// assert!(is_valid_guard(&buf, GUARD_SENTINEL, 2));
/// assert!(!is_valid_guard(&buf, GUARD_SENTINEL, 3));
/// ```
pub fn is_valid_guard(buf: &[Complex32], sentinel: Complex32, guard: usize) -> bool {
    if buf.len() < 2 * guard {
        return false;
    }
    let bits = |v: &Complex32| (v.re.to_bits(), v.im.to_bits());
    let want = bits(&sentinel);
    buf[..guard]
        .iter()
        .chain(buf[buf.len() - guard..].iter())
        .all(|v| bits(v) == want)
}
