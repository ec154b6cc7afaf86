//! One-pole damping filter for delay-line feedback paths.
//!
//! ```text
//! y[n] = b0 · x[n] − a1 · y[n−1]
//! ```
//!
//! With `b0 = g · (1 − a)` and `a1 = −a` the DC gain is exactly `g` (the
//! line's decay gain) while higher frequencies are attenuated further, so a
//! single filter sets both the decay rate and the spectral tilt of a line.
//!
//! # Reference
//!
//! Jean-Marc Jot, Antoine Chaigne, "Digital Delay Networks for Designing
//! Artificial Reverberators", AES 90th Convention, 1991.

/// One-pole IIR lowpass with explicit coefficients.
///
/// # Invariants
///
/// - Stable whenever `|a1| < 1`
/// - Coefficients change only on [`set_coefficients`](Self::set_coefficients);
///   the feedback sample survives coefficient updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampingFilter {
    b0: f32,
    a1: f32,
    state: f32,
}

impl Default for DampingFilter {
    /// Unity pass-through.
    fn default() -> Self {
        Self {
            b0: 1.0,
            a1: 0.0,
            state: 0.0,
        }
    }
}

impl DampingFilter {
    /// Create a filter with the given coefficients.
    pub fn new(b0: f32, a1: f32) -> Self {
        Self { b0, a1, state: 0.0 }
    }

    /// Set the feed-forward and feedback coefficients.
    #[inline]
    pub fn set_coefficients(&mut self, b0: f32, a1: f32) {
        self.b0 = b0;
        self.a1 = a1;
    }

    /// Feed-forward coefficient.
    #[inline]
    pub fn b0(&self) -> f32 {
        self.b0
    }

    /// Feedback coefficient.
    #[inline]
    pub fn a1(&self) -> f32 {
        self.a1
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = input * self.b0 - self.state * self.a1;
        self.state = output;
        output
    }

    /// Clear the feedback sample.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
