//! Construction-time reverb configuration.
//!
//! These values shape the network itself (how many lines, how long they are,
//! how the roomsize control maps to decay time) and are fixed for the life of
//! a [`ReverbModel`](crate::ReverbModel). Changing them means building a new
//! model.

use fdnverb_core::{decay_gain, decay_time_from_gain};

use crate::tables::{
    DELAY_LENGTHS_8, DELAY_LENGTHS_12, MAX_DECAY_TIME, MIN_DECAY_TIME, MOD_DEPTH, MOD_FREQ,
    MOD_RATE, REFERENCE_RATE,
};

/// Number of delay lines in the network.
///
/// Serialized as the plain count (`8` or `12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub enum LineCount {
    /// Eight lines: the lighter default.
    #[default]
    Eight,
    /// Twelve lines: denser tail, 50% more CPU.
    Twelve,
}

impl LineCount {
    /// Number of lines.
    pub const fn count(self) -> usize {
        match self {
            LineCount::Eight => 8,
            LineCount::Twelve => 12,
        }
    }

    /// Nominal delay lengths at 44.1 kHz.
    pub fn delay_lengths(self) -> &'static [usize] {
        match self {
            LineCount::Eight => &DELAY_LENGTHS_8,
            LineCount::Twelve => &DELAY_LENGTHS_12,
        }
    }
}

impl TryFrom<usize> for LineCount {
    type Error = String;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            8 => Ok(LineCount::Eight),
            12 => Ok(LineCount::Twelve),
            other => Err(format!("unsupported line count {other} (expected 8 or 12)")),
        }
    }
}

impl From<LineCount> for usize {
    fn from(lines: LineCount) -> Self {
        lines.count()
    }
}

/// Mapping from the roomsize control to the network's DC decay time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RoomsizeResponse {
    /// Interpolate the longest line's loop gain between the 0.7 s and 12.5 s
    /// gains, then invert to a decay time. Gives the concave, Freeverb-like
    /// feel where most of the travel covers small and medium rooms.
    #[default]
    Concave,
    /// Decay time linear in seconds from 0.7 s to 12.5 s.
    Linear,
}

impl RoomsizeResponse {
    /// Decay time and reference loop gain for `roomsize`.
    ///
    /// # Arguments
    ///
    /// * `roomsize` - Control value in [0, 1]
    /// * `longest_line` - Ring size of the longest line in samples
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// Returns `(t60_seconds, gain_of_longest_line)`.
    pub fn decay(self, roomsize: f32, longest_line: f32, sample_rate: f32) -> (f32, f32) {
        match self {
            RoomsizeResponse::Concave => {
                let gain_min = decay_gain(longest_line, sample_rate, MIN_DECAY_TIME);
                let gain_max = decay_gain(longest_line, sample_rate, MAX_DECAY_TIME);
                let gain = gain_min + roomsize * (gain_max - gain_min);
                (decay_time_from_gain(longest_line, sample_rate, gain), gain)
            }
            RoomsizeResponse::Linear => {
                let t60 = MIN_DECAY_TIME + roomsize * (MAX_DECAY_TIME - MIN_DECAY_TIME);
                (t60, decay_gain(longest_line, sample_rate, t60))
            }
        }
    }
}

/// Network construction settings.
///
/// # Example
///
/// ```rust
/// use fdnverb_reverb::{LineCount, ReverbConfig, RoomsizeResponse};
///
/// let config = ReverbConfig::default()
///     .with_line_count(LineCount::Twelve)
///     .with_response(RoomsizeResponse::Linear);
/// assert_eq!(config.line_count.count(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ReverbConfig {
    /// Delay-length table selection.
    #[cfg_attr(feature = "serde", serde(rename = "lines"))]
    pub line_count: LineCount,
    /// Roomsize-to-decay mapping.
    pub response: RoomsizeResponse,
    /// Modulation depth in samples at 44.1 kHz.
    pub mod_depth: usize,
    /// Samples between modulator updates.
    pub mod_rate: usize,
    /// Modulation frequency in Hz.
    pub mod_freq: f32,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        Self {
            line_count: LineCount::Eight,
            response: RoomsizeResponse::Concave,
            mod_depth: MOD_DEPTH,
            mod_rate: MOD_RATE,
            mod_freq: MOD_FREQ,
        }
    }
}

impl ReverbConfig {
    /// Select the line count.
    pub fn with_line_count(mut self, line_count: LineCount) -> Self {
        self.line_count = line_count;
        self
    }

    /// Select the roomsize response.
    pub fn with_response(mut self, response: RoomsizeResponse) -> Self {
        self.response = response;
        self
    }

    /// Set modulation depth (samples at 44.1 kHz), update interval and frequency.
    pub fn with_modulation(mut self, depth: usize, rate: usize, freq_hz: f32) -> Self {
        self.mod_depth = depth;
        self.mod_rate = rate;
        self.mod_freq = freq_hz;
        self
    }

    /// Scale applied to lengths and depth at `sample_rate`.
    ///
    /// Tables are stretched above the reference rate so delay times in
    /// seconds stay put; at or below 44.1 kHz the nominal counts are used.
    pub fn length_factor(sample_rate: f32) -> f32 {
        (sample_rate / REFERENCE_RATE).max(1.0)
    }

    /// Nominal delay length of line `index` in samples at `sample_rate`.
    pub fn delay_length(&self, index: usize, sample_rate: f32) -> usize {
        let nominal = self.line_count.delay_lengths()[index];
        (nominal as f32 * Self::length_factor(sample_rate)) as usize
    }

    /// Modulation depth in samples at `sample_rate`.
    pub fn scaled_mod_depth(&self, sample_rate: f32) -> usize {
        (self.mod_depth as f32 * Self::length_factor(sample_rate)) as usize
    }
}
