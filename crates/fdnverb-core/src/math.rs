//! Mathematical utility functions for delay-network reverberation.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Decay Relation
//!
//! A recirculating delay of `L` samples decays by 60 dB in `T60` seconds when
//! its loop gain is
//!
//! ```text
//! g = 10^(-3 · L / (fs · T60))
//! ```
//!
//! [`decay_gain`] evaluates this relation and [`decay_time_from_gain`] inverts it.

use libm::{expf, logf, powf};

/// Tiny DC bias added to the network input and removed from its output.
///
/// Keeps recursive filter state away from exact zero so decaying tails never
/// reach the subnormal range, without any target-specific floating-point
/// control.
pub const DC_OFFSET: f32 = 1e-8;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use fdnverb_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below 1e-10 are floored there (-200 dB).
///
/// # Example
/// ```rust
/// use fdnverb_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Loop gain giving a 60 dB decay in `t60` seconds for a `delay_samples` loop.
///
/// # Arguments
/// * `delay_samples` - Loop length in samples
/// * `sample_rate` - Sample rate in Hz
/// * `t60` - Target decay time in seconds (must be > 0)
///
/// Returns a gain in (0, 1) for any positive length and decay time.
#[inline]
pub fn decay_gain(delay_samples: f32, sample_rate: f32, t60: f32) -> f32 {
    powf(10.0, -3.0 * delay_samples / (sample_rate * t60))
}

/// Decay time in seconds implied by a loop `gain` over `delay_samples`.
///
/// Inverse of [`decay_gain`]: `T60 = -3 · ln(10) · L / (fs · ln(g))`.
/// `gain` must lie in (0, 1).
#[inline]
pub fn decay_time_from_gain(delay_samples: f32, sample_rate: f32, gain: f32) -> f32 {
    -3.0 * core::f32::consts::LN_10 * delay_samples / (sample_rate * logf(gain))
}
