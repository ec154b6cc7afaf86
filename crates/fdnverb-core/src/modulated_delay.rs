//! Pitch-modulated, damped delay tap for FDN reverbs.
//!
//! A slowly moving read position breaks up the fixed modal pattern of a delay
//! network, removing the metallic ringing of static delay lengths.
//!
//! ## DSP Structure
//!
//! ```text
//!              write_pos
//!                  │   read pos = write_pos + center − depth·sin(…)
//! input ──→ [ DelayBuffer ] ──→ all-pass interp ──→ [ DampingFilter ] ──→ output
//!                                    ↑ frac (held between modulator updates)
//! ```
//!
//! The modulator only advances every `mod_rate` reads. Between updates the
//! read pointer moves in lockstep with the write pointer and the stored
//! fractional offset is reused, so the interpolation stays smooth on every
//! sample while the modulator (and position arithmetic) runs at a fraction of
//! the sample rate.
//!
//! ## Delay Geometry
//!
//! The ring holds `delay_length + mod_depth + INTERP_SAMPLES` samples. The
//! read position sits `mod_depth + INTERP_SAMPLES − depth·m` slots ahead of the
//! write position, giving an effective delay of `delay_length + depth·m` for
//! modulator output `m ∈ [−1, 1]`. Depth is clamped to `delay_length − 1`, so
//! the effective delay never reaches zero.
//!
//! A rising modulator lengthens the line. Starting at phase 0 the tap lags
//! for the first half period, so an impulse never arrives before
//! `delay_length`.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::collections::TryReserveError;
use libm::floorf;

use crate::{DelayBuffer, SineModulator};

/// Extra ring samples reserved for the interpolator's look-ahead.
pub const INTERP_SAMPLES: usize = 1;

/// Delay line with modulated read position, all-pass interpolation and damping.
///
/// # Example
///
/// ```rust
/// use fdnverb_core::ModulatedDelayLine;
///
/// let mut line = ModulatedDelayLine::try_new(601, 4, 50).unwrap();
/// line.set_modulation(1.0, 44100.0, 0.0);
///
/// line.push(1.0);
/// let out = line.read_damped();
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct ModulatedDelayLine {
    delay: DelayBuffer,
    modulator: SineModulator,
    /// Read offset from the write index at zero modulation
    center_pos: f32,
    /// Modulation depth in samples
    mod_depth: usize,
    /// Reads between modulator updates
    mod_rate: usize,
    /// Reads since the last modulator update
    index_rate: usize,
    /// Fractional read offset held between updates
    frac_pos: f32,
    /// Previous interpolator output
    interp_memory: f32,
}

impl ModulatedDelayLine {
    /// Build a line of `delay_length` samples.
    ///
    /// # Arguments
    ///
    /// * `delay_length` - Nominal delay in samples (raised to at least 1)
    /// * `mod_depth` - Modulation depth in samples (clamped to `delay_length - 1`)
    /// * `mod_rate` - Reads between modulator updates (raised to at least 1)
    ///
    /// The modulator is idle (constant zero) until
    /// [`set_modulation`](Self::set_modulation) is called.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the ring cannot be reserved.
    pub fn try_new(
        delay_length: usize,
        mod_depth: usize,
        mod_rate: usize,
    ) -> Result<Self, TryReserveError> {
        let delay_length = delay_length.max(1);
        let mod_depth = mod_depth.min(delay_length - 1);
        let mod_rate = mod_rate.max(1);

        let delay = DelayBuffer::try_new(delay_length + mod_depth + INTERP_SAMPLES)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            "modulated_delay: length={delay_length} depth={mod_depth} rate={mod_rate} size={}",
            delay.len()
        );

        Ok(Self {
            delay,
            modulator: SineModulator::new(0.0, 1.0, 0.0),
            center_pos: (mod_depth + INTERP_SAMPLES) as f32,
            mod_depth,
            mod_rate,
            // Forces a position update on the first read
            index_rate: mod_rate,
            frac_pos: 0.0,
            interp_memory: 0.0,
        })
    }

    /// Configure the modulator.
    ///
    /// # Arguments
    ///
    /// * `freq_hz` - Modulation frequency in Hz
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `phase_degrees` - Initial modulator phase
    ///
    /// The modulator advances once per `mod_rate` reads, so it is tuned at
    /// `freq_hz · mod_rate` relative to the audio rate.
    pub fn set_modulation(&mut self, freq_hz: f32, sample_rate: f32, phase_degrees: f32) {
        self.modulator
            .set_frequency(freq_hz * self.mod_rate as f32, sample_rate, phase_degrees);
    }

    /// Set the damping filter coefficients (`b0`, `a1`).
    pub fn set_damping(&mut self, b0: f32, a1: f32) {
        self.delay.set_damping(b0, a1);
    }

    /// Read the next interpolated tap (before damping).
    #[inline]
    pub fn read(&mut self) -> f32 {
        self.index_rate += 1;
        if self.index_rate >= self.mod_rate {
            self.index_rate = 0;
            self.update_read_position();
        }

        // First-order all-pass interpolation between the current and next slot
        let index = self.delay.read_pos();
        let next = self.delay.next_index(index);
        let current = self.delay.read(index);
        let out = current + self.frac_pos * (self.delay.read(next) - self.interp_memory);

        self.interp_memory = out;
        self.delay.set_read_pos(next);
        out
    }

    /// Read the next tap through the damping filter.
    #[inline]
    pub fn read_damped(&mut self) -> f32 {
        let tap = self.read();
        self.delay.damp(tap)
    }

    /// Write the line's next input sample.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.delay.push(sample);
    }

    /// Ring size in samples (nominal length + depth + interpolation margin).
    pub fn size(&self) -> usize {
        self.delay.len()
    }

    /// Effective modulation depth in samples.
    pub fn mod_depth(&self) -> usize {
        self.mod_depth
    }

    /// Reads between modulator updates.
    pub fn mod_rate(&self) -> usize {
        self.mod_rate
    }

    /// Underlying delay buffer.
    pub fn buffer(&self) -> &DelayBuffer {
        &self.delay
    }

    /// Refill the ring with the DC baseline and clear filter/interpolator memory.
    ///
    /// Modulator phase keeps running.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.interp_memory = 0.0;
    }

    /// Recompute the integer read index and fractional remainder.
    fn update_read_position(&mut self) {
        let pos = self.delay.write_pos() as f32
            + self.center_pos
            - self.modulator.next() * self.mod_depth as f32;

        let whole = floorf(pos);
        self.frac_pos = pos - whole;

        let len = self.delay.len() as i64;
        let index = (whole as i64).rem_euclid(len);
        self.delay.set_read_pos(index as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DC_OFFSET;

    /// Push an impulse followed by zeros and report the first read that sees it.
    fn first_arrival(line: &mut ModulatedDelayLine, limit: usize) -> Option<usize> {
        for n in 0..limit {
            let out = line.read();
            if (out - DC_OFFSET).abs() > 1e-3 {
                return Some(n);
            }
            line.push(if n == 0 { 1.0 } else { 0.0 });
        }
        None
    }

    #[test]
    fn unmodulated_line_delays_by_length() {
        let mut line = ModulatedDelayLine::try_new(100, 0, 1).unwrap();
        assert_eq!(line.size(), 101);
        // Read at tick n sees the sample pushed at tick n - 100
        assert_eq!(first_arrival(&mut line, 500), Some(100));
    }

    #[test]
    fn idle_modulator_keeps_nominal_delay() {
        let mut line = ModulatedDelayLine::try_new(50, 4, 8).unwrap();
        assert_eq!(line.size(), 55);
        assert_eq!(first_arrival(&mut line, 500), Some(50));
    }

    #[test]
    fn modulation_keeps_delay_within_depth() {
        for phase in [0.0, 90.0, 180.0, 270.0] {
            let mut line = ModulatedDelayLine::try_new(200, 4, 10).unwrap();
            line.set_modulation(5.0, 44100.0, phase);
            let n = first_arrival(&mut line, 1000).unwrap();
            // Interpolator looks one slot ahead of the modulated position
            assert!((195..=204).contains(&n), "phase {phase}: arrival at {n}");
        }
    }

    #[test]
    fn zero_phase_start_never_arrives_early() {
        for rate in [1, 10, 50] {
            let mut line = ModulatedDelayLine::try_new(200, 4, rate).unwrap();
            line.set_modulation(5.0, 44100.0, 0.0);
            let n = first_arrival(&mut line, 1000).unwrap();
            assert!((200..=204).contains(&n), "rate {rate}: arrival at {n}");
        }
    }

    #[test]
    fn depth_is_clamped_below_length() {
        let line = ModulatedDelayLine::try_new(3, 10, 1).unwrap();
        assert_eq!(line.mod_depth(), 2);
        assert_eq!(line.size(), 3 + 2 + INTERP_SAMPLES);
    }

    #[test]
    fn degenerate_arguments_are_raised() {
        let line = ModulatedDelayLine::try_new(0, 0, 0).unwrap();
        assert_eq!(line.size(), 1 + INTERP_SAMPLES);
        assert_eq!(line.mod_rate(), 1);
        assert_eq!(line.mod_depth(), 0);
    }

    #[test]
    fn interpolation_preserves_energy() {
        let mut line = ModulatedDelayLine::try_new(64, 4, 4).unwrap();
        line.set_modulation(1.0, 1000.0, 45.0);
        line.clear();

        let mut energy_in = 0.0f32;
        let mut energy_out = 0.0f32;
        for n in 0..20_000 {
            let x = if n < 5000 {
                libm::sinf(n as f32 * 0.05)
            } else {
                0.0
            };
            energy_in += x * x;
            let y = line.read();
            energy_out += y * y;
            line.push(x);
        }
        let ratio = energy_out / energy_in;
        assert!(ratio > 0.9 && ratio < 1.1, "energy ratio {ratio}");
    }

    #[test]
    fn damping_applies_to_output() {
        let mut line = ModulatedDelayLine::try_new(10, 0, 1).unwrap();
        line.set_damping(0.5, 0.0);
        for _ in 0..10 {
            line.read_damped();
            line.push(1.0);
        }
        let out = line.read_damped();
        assert!((out - 0.5).abs() < 1e-6, "got {out}");
    }

    #[test]
    fn clear_restores_baseline() {
        let mut line = ModulatedDelayLine::try_new(20, 2, 5).unwrap();
        line.set_modulation(1.0, 44100.0, 0.0);
        for _ in 0..100 {
            line.read();
            line.push(0.8);
        }
        line.clear();
        for _ in 0..100 {
            let out = line.read();
            assert!((out - DC_OFFSET).abs() < 1e-7, "got {out}");
            line.push(DC_OFFSET);
        }
    }
}
