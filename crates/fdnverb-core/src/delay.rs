//! Circular delay buffer for feedback delay networks.
//!
//! A [`DelayBuffer`] keeps independent read and write indices over a fixed
//! ring of samples and carries the [`DampingFilter`] that sits on its output.
//! Reading and writing never allocate; the ring is reserved once at
//! construction.
//!
//! # Baseline
//!
//! The ring starts (and is cleared back to) [`DC_OFFSET`] rather than exact
//! zero, matching the DC bias the network keeps on its input. A freshly built
//! line therefore never feeds exact zeros into the recursive filters.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use crate::{DC_OFFSET, DampingFilter};

/// Circular sample buffer with independent read/write positions.
///
/// # Memory
///
/// The buffer is reserved with `try_reserve_exact` during construction and
/// never reallocates. No allocations occur during audio processing.
///
/// # Example
///
/// ```rust
/// use fdnverb_core::DelayBuffer;
///
/// let mut delay = DelayBuffer::try_new(4).unwrap();
/// delay.push(1.0);
/// assert_eq!(delay.read(0), 1.0);
/// assert_eq!(delay.write_pos(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DelayBuffer {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Next index to be written
    write_pos: usize,
    /// Next index to be read
    read_pos: usize,
    /// Output damping filter
    damping: DampingFilter,
}

impl DelayBuffer {
    /// Reserve a ring of `size` samples filled with the DC baseline.
    ///
    /// A `size` of 0 is raised to 1.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the ring cannot be reserved.
    pub fn try_new(size: usize) -> Result<Self, TryReserveError> {
        let size = size.max(1);
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(size)?;
        buffer.resize(size, DC_OFFSET);

        Ok(Self {
            buffer,
            write_pos: 0,
            read_pos: 0,
            damping: DampingFilter::default(),
        })
    }

    /// Write a sample at the write index and advance it circularly.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos >= self.buffer.len() {
            self.write_pos = 0;
        }
    }

    /// Stored value at `index`.
    ///
    /// `index` must be below [`len`](Self::len).
    #[inline]
    pub fn read(&self, index: usize) -> f32 {
        self.buffer[index]
    }

    /// Index the next [`push`](Self::push) writes to.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Current read index.
    #[inline]
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Move the read index, wrapping it into the ring.
    #[inline]
    pub fn set_read_pos(&mut self, index: usize) {
        self.read_pos = index % self.buffer.len();
    }

    /// Index following `index` in the ring.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.buffer.len() { 0 } else { next }
    }

    /// Ring size in samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always `false`: the ring holds at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Run `input` through the attached damping filter.
    #[inline]
    pub fn damp(&mut self, input: f32) -> f32 {
        self.damping.process(input)
    }

    /// Attached damping filter.
    pub fn damping(&self) -> &DampingFilter {
        &self.damping
    }

    /// Set the damping filter's coefficients.
    pub fn set_damping(&mut self, b0: f32, a1: f32) {
        self.damping.set_coefficients(b0, a1);
    }

    /// Refill the ring with the DC baseline and clear the damping state.
    ///
    /// Read and write indices keep their relative offset.
    pub fn clear(&mut self) {
        self.buffer.fill(DC_OFFSET);
        self.damping.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_dc_baseline() {
        let delay = DelayBuffer::try_new(8).unwrap();
        for i in 0..delay.len() {
            assert_eq!(delay.read(i), DC_OFFSET);
        }
    }

    #[test]
    fn push_wraps_write_index() {
        let mut delay = DelayBuffer::try_new(3).unwrap();
        for i in 0..4 {
            delay.push(i as f32);
        }
        assert_eq!(delay.write_pos(), 1);
        // Fourth push overwrote index 0
        assert_eq!(delay.read(0), 3.0);
        assert_eq!(delay.read(1), 1.0);
        assert_eq!(delay.read(2), 2.0);
    }

    #[test]
    fn zero_size_is_raised_to_one() {
        let mut delay = DelayBuffer::try_new(0).unwrap();
        assert_eq!(delay.len(), 1);
        delay.push(0.5);
        assert_eq!(delay.read(0), 0.5);
        assert_eq!(delay.write_pos(), 0);
    }

    #[test]
    fn read_index_wraps() {
        let mut delay = DelayBuffer::try_new(5).unwrap();
        delay.set_read_pos(7);
        assert_eq!(delay.read_pos(), 2);
        assert_eq!(delay.next_index(4), 0);
        assert_eq!(delay.next_index(1), 2);
    }

    #[test]
    fn clear_restores_baseline_and_damping() {
        let mut delay = DelayBuffer::try_new(4).unwrap();
        delay.set_damping(0.5, -0.5);
        for _ in 0..4 {
            delay.push(1.0);
        }
        delay.damp(1.0);
        delay.clear();

        for i in 0..delay.len() {
            assert_eq!(delay.read(i), DC_OFFSET);
        }
        assert_eq!(delay.damp(0.0), 0.0);
        // Coefficients survive a clear
        assert_eq!(delay.damping().b0(), 0.5);
    }
}
