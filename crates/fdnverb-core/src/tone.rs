//! Input tone correction for damped delay networks.
//!
//! Damping filters inside the loop make the reverb tail darker the longer it
//! rings. A first-order section on the network input compensates the overall
//! spectral tilt so the tail's tone stays consistent:
//!
//! ```text
//! y[n] = b1 · x[n] − b2 · x[n−1]
//! β  = (1 − α) / (1 + α)
//! b1 = 1 / (1 − β)
//! b2 = β · b1
//! ```
//!
//! DC gain is always 1 (`b1 − b2 = 1`); with `α = 1` (no damping) the section
//! reduces to a pass-through.

/// First-order tone corrector applied once to the network input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCorrector {
    b1: f32,
    b2: f32,
    prev: f32,
}

impl Default for ToneCorrector {
    fn default() -> Self {
        Self {
            b1: 1.0,
            b2: 0.0,
            prev: 0.0,
        }
    }
}

impl ToneCorrector {
    /// Derive coefficients from the damping ratio `alpha` (0 < alpha <= 1).
    ///
    /// The input memory is preserved.
    pub fn set_alpha(&mut self, alpha: f32) {
        let beta = (1.0 - alpha) / (1.0 + alpha);
        self.b1 = 1.0 / (1.0 - beta);
        self.b2 = beta * self.b1;
    }

    /// Current-sample coefficient.
    #[inline]
    pub fn b1(&self) -> f32 {
        self.b1
    }

    /// Previous-sample coefficient.
    #[inline]
    pub fn b2(&self) -> f32 {
        self.b2
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = input * self.b1 - self.b2 * self.prev;
        self.prev = input;
        output
    }

    /// Clear the input memory.
    pub fn reset(&mut self) {
        self.prev = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_alpha_is_pass_through() {
        let mut tc = ToneCorrector::default();
        tc.set_alpha(1.0);
        assert_eq!(tc.b1(), 1.0);
        assert_eq!(tc.b2(), 0.0);
        assert_eq!(tc.process(0.3), 0.3);
    }

    #[test]
    fn dc_gain_is_unity() {
        for alpha in [0.2, 0.5, 0.8, 1.0] {
            let mut tc = ToneCorrector::default();
            tc.set_alpha(alpha);
            assert!((tc.b1() - tc.b2() - 1.0).abs() < 1e-5, "alpha={alpha}");
            tc.process(1.0);
            let y = tc.process(1.0);
            assert!((y - 1.0).abs() < 1e-5, "alpha={alpha}: {y}");
        }
    }

    #[test]
    fn boosts_high_frequencies_when_damped() {
        let mut tc = ToneCorrector::default();
        tc.set_alpha(0.5);
        tc.process(1.0);
        // Nyquist gain is (b1 + b2) > 1
        let y = tc.process(-1.0);
        assert!(y.abs() > 1.0, "got {y}");
    }
}
