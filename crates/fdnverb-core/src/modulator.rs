//! Recurrence sine oscillator for delay-line modulation.
//!
//! Generates `sin(phase + n·w)` with the two-pole recurrence
//!
//! ```text
//! y[n] = a1 · y[n−1] − y[n−2],   a1 = 2·cos(w)
//! ```
//!
//! so a network with a dozen modulated lines costs one multiply and one
//! subtract per oscillator step instead of a transcendental call.
//!
//! The recurrence sits on the unit circle and slowly drifts in f32. Whenever a
//! step would leave [-1, 1] the output is pinned to the extremum and the
//! history is reloaded with `±sin(π/2 − w)`, which continues the sinusoid
//! exactly from its peak.

use core::f32::consts::{FRAC_PI_2, TAU};
use libm::{cosf, sinf};

/// Low-cost sinusoidal modulator.
///
/// # Example
///
/// ```rust
/// use fdnverb_core::SineModulator;
///
/// let mut m = SineModulator::new(1.0, 1000.0, 90.0);
/// let first = m.next();
/// assert!(first <= 1.0 && first > 0.99);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineModulator {
    /// Recurrence coefficient, 2·cos(w)
    a1: f32,
    /// y[n−1]
    y1: f32,
    /// y[n−2]
    y2: f32,
    /// History reload value at the positive extremum
    reset_y2: f32,
}

impl SineModulator {
    /// Create a modulator running at `freq_hz` with an initial phase in degrees.
    pub fn new(freq_hz: f32, sample_rate: f32, phase_degrees: f32) -> Self {
        let mut m = Self {
            a1: 2.0,
            y1: 0.0,
            y2: 0.0,
            reset_y2: 1.0,
        };
        m.set_frequency(freq_hz, sample_rate, phase_degrees);
        m
    }

    /// Precompute the coefficient and history for a frequency and start phase.
    ///
    /// `sample_rate` is the rate at which [`next`](Self::next) is called.
    pub fn set_frequency(&mut self, freq_hz: f32, sample_rate: f32, phase_degrees: f32) {
        let w = TAU * freq_hz / sample_rate;
        let phase = phase_degrees.to_radians();

        self.a1 = 2.0 * cosf(w);
        self.y1 = sinf(phase);
        self.y2 = sinf(phase - w);
        self.reset_y2 = sinf(FRAC_PI_2 - w);
    }

    /// Advance one step and return the new value in [-1, 1].
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        let mut out = self.a1 * self.y1 - self.y2;
        self.y2 = self.y1;

        if out >= 1.0 {
            out = 1.0;
            self.y2 = self.reset_y2;
        } else if out <= -1.0 {
            out = -1.0;
            self.y2 = -self.reset_y2;
        }

        self.y1 = out;
        out
    }

    /// Recurrence coefficient `2·cos(w)`.
    pub fn coefficient(&self) -> f32 {
        self.a1
    }
}
