//! Reverb model: parameter mapping and block processing.
//!
//! [`ReverbModel`] owns a [`FeedbackNetwork`] and turns the four user
//! parameters into the network's coefficients:
//!
//! ```text
//! roomsize ─→ T60 ─→ gi = 10^(−3·Li / (fs·T60))     per-line loop gain
//! damping  ─→ α²  ─→ ai = ¼·ln(gi)·(1 − 1/α²)       per-line damping pole
//!             α   ─→ β = (1−α)/(1+α)                input tone correction
//! width, level ─→ wet1 (per-line output gain), wet2 (cross-channel mix)
//! ```
//!
//! Every parameter change is an O(N) recompute; processing itself is a
//! fixed loop over caller-owned buffers.

use fdnverb_core::{DC_OFFSET, StereoSend};
use libm::{logf, sqrtf};

use crate::config::ReverbConfig;
use crate::error::{ReverbError, validate_sample_rate};
use crate::network::FeedbackNetwork;
use crate::params::{ParamMask, ReverbParams};
use crate::tables::{FIXED_GAIN, SCALE_WET, SCALE_WET_WIDTH};

/// Snapshot of one line's derived coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineCoefficients {
    /// Ring size in samples.
    pub size: usize,
    /// DC loop gain gi.
    pub gain: f32,
    /// Damping feed-forward coefficient.
    pub b0: f32,
    /// Damping feedback coefficient.
    pub a1: f32,
}

/// Snapshot of every coefficient derived from the current parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coefficients {
    /// DC decay time in seconds.
    pub decay_time: f32,
    /// Damping ratio α.
    pub alpha: f32,
    /// Tone corrector feed-forward gain.
    pub tone_b1: f32,
    /// Tone corrector previous-input gain.
    pub tone_b2: f32,
    /// Per-line output gain magnitude.
    pub wet1: f32,
    /// Cross-channel mix applied per sample (`wet2 / wet1`).
    pub wet2: f32,
    /// Per-line coefficients in table order.
    pub lines: Vec<LineCoefficients>,
}

/// Stereo FDN late reverb with a mono input.
///
/// # Example
///
/// ```rust
/// use fdnverb_reverb::{ParamMask, ReverbModel, ReverbParams};
///
/// let mut reverb = ReverbModel::new(44100.0)?;
/// reverb.set_roomsize(0.8);
///
/// let mut input = [0.0f32; 128];
/// input[0] = 1.0;
/// let mut left = [0.0f32; 128];
/// let mut right = [0.0f32; 128];
/// reverb.process_replace(&input, &mut left, &mut right);
/// assert!(reverb.decay_time() > 1.0);
/// # Ok::<(), fdnverb_reverb::ReverbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReverbModel {
    network: FeedbackNetwork,
    config: ReverbConfig,
    sample_rate: f32,
    params: ReverbParams,
    decay_time: f32,
    alpha: f32,
    wet1: f32,
    /// wet2 pre-divided by wet1
    wet2: f32,
}

impl ReverbModel {
    /// Build an 8-line reverb with default configuration and parameters.
    ///
    /// # Errors
    ///
    /// [`ReverbError::InvalidSampleRate`] for a rate below
    /// [`MIN_SAMPLE_RATE`](crate::tables::MIN_SAMPLE_RATE) or not finite, [`ReverbError::Allocation`] if delay memory cannot be reserved.
    pub fn new(sample_rate: f32) -> Result<Self, ReverbError> {
        Self::with_config(sample_rate, ReverbConfig::default())
    }

    /// Build a reverb with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_config(sample_rate: f32, config: ReverbConfig) -> Result<Self, ReverbError> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        let network = FeedbackNetwork::try_new(&config, sample_rate)?;

        let mut model = Self {
            network,
            config,
            sample_rate,
            params: ReverbParams::default(),
            decay_time: 0.0,
            alpha: 1.0,
            wet1: 0.0,
            wet2: 0.0,
        };
        model.update_coefficients();
        Ok(model)
    }

    /// Apply the fields of `params` selected by `mask`, then recompute.
    ///
    /// Values are clamped to their ranges; non-finite values leave the
    /// current setting in place. Always recomputes, even for an empty mask.
    pub fn set_parameters(&mut self, params: &ReverbParams, mask: ParamMask) {
        let mut next = self.params;
        next.merge(params, mask);
        self.params = next.clamped_or(&self.params);
        self.update_coefficients();
    }

    /// Set room size in [0, 1].
    pub fn set_roomsize(&mut self, roomsize: f32) {
        self.set_single(ReverbParams { roomsize, ..self.params }, ParamMask::ROOMSIZE);
    }

    /// Set damping in [0, 1].
    pub fn set_damping(&mut self, damping: f32) {
        self.set_single(ReverbParams { damping, ..self.params }, ParamMask::DAMPING);
    }

    /// Set stereo width in [0, 100].
    pub fn set_width(&mut self, width: f32) {
        self.set_single(ReverbParams { width, ..self.params }, ParamMask::WIDTH);
    }

    /// Set output level in [0, 1].
    pub fn set_level(&mut self, level: f32) {
        self.set_single(ReverbParams { level, ..self.params }, ParamMask::LEVEL);
    }

    fn set_single(&mut self, params: ReverbParams, mask: ParamMask) {
        self.set_parameters(&params, mask);
    }

    /// Current (clamped) parameters.
    pub fn params(&self) -> ReverbParams {
        self.params
    }

    /// Construction-time configuration.
    pub fn config(&self) -> &ReverbConfig {
        &self.config
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// DC decay time in seconds implied by the current room size.
    pub fn decay_time(&self) -> f32 {
        self.decay_time
    }

    /// Number of delay lines.
    pub fn line_count(&self) -> usize {
        self.network.len()
    }

    /// Ring sizes of every line in samples.
    pub fn delay_lengths(&self) -> Vec<usize> {
        self.network.lines().iter().map(|l| l.size()).collect()
    }

    /// The underlying network.
    pub fn network(&self) -> &FeedbackNetwork {
        &self.network
    }

    /// Snapshot of all derived coefficients.
    pub fn coefficients(&self) -> Coefficients {
        let lines = self
            .network
            .lines()
            .iter()
            .zip(self.network.gains())
            .map(|(line, &gain)| {
                let damping = line.buffer().damping();
                LineCoefficients {
                    size: line.size(),
                    gain,
                    b0: damping.b0(),
                    a1: damping.a1(),
                }
            })
            .collect();

        Coefficients {
            decay_time: self.decay_time,
            alpha: self.alpha,
            tone_b1: self.network.tone().b1(),
            tone_b2: self.network.tone().b2(),
            wet1: self.wet1,
            wet2: self.wet2,
            lines,
        }
    }

    /// Clear all delay contents to the DC baseline.
    ///
    /// Parameters and modulator phases are kept.
    pub fn reset(&mut self) {
        self.network.clear();
        tracing::debug!(lines = self.network.len(), "reverb reset");
    }

    /// Rebuild the network for a new sample rate.
    ///
    /// Reallocates every delay line; call only while rendering is stopped.
    /// On error the model is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), ReverbError> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        let network = FeedbackNetwork::try_new(&self.config, sample_rate)?;

        tracing::debug!(from = self.sample_rate, to = sample_rate, "sample rate changed");

        self.network = network;
        self.sample_rate = sample_rate;
        self.update_coefficients();
        Ok(())
    }

    /// Render a block, overwriting `left` and `right`.
    ///
    /// Processes the shortest of the three slices; samples past it are left
    /// untouched.
    pub fn process_replace(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.render(input, left, right, |out, value| *out = value);
    }

    /// Render a block, adding into `left` and `right`.
    ///
    /// Processes the shortest of the three slices; samples past it are left
    /// untouched.
    pub fn process_mix(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.render(input, left, right, |out, value| *out += value);
    }

    #[inline]
    fn render(
        &mut self,
        input: &[f32],
        left: &mut [f32],
        right: &mut [f32],
        mut write: impl FnMut(&mut f32, f32),
    ) {
        let wet2 = self.wet2;
        for ((x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            let (out_l, out_r) = self.network.tick(x * FIXED_GAIN + DC_OFFSET);
            let out_l = out_l - DC_OFFSET;
            let out_r = out_r - DC_OFFSET;
            write(l, out_l + out_r * wet2);
            write(r, out_r + out_l * wet2);
        }
    }

    fn update_coefficients(&mut self) {
        let p = self.params;
        let sr = self.sample_rate;

        let longest = self.network.longest_line() as f32;
        let (t60, gain) = self.config.response.decay(p.roomsize, longest, sr);
        let alpha2 = 1.0 / (1.0 - p.damping / (0.25 * logf(gain)));
        let alpha = sqrtf(alpha2);

        self.network.update_decay(t60, alpha2, sr);
        self.network.set_tone(alpha);

        let wet = p.level * SCALE_WET / (1.0 + p.width * SCALE_WET_WIDTH);
        let wet1 = wet * (p.width / 2.0 + 0.5);
        let wet2 = wet * ((1.0 - p.width) / 2.0);
        self.network.set_output_gains(wet1);

        self.decay_time = t60;
        self.alpha = alpha;
        self.wet1 = wet1;
        self.wet2 = if wet1 > 0.0 { wet2 / wet1 } else { 0.0 };

        tracing::trace!(t60, alpha, wet1, wet2 = self.wet2, "reverb coefficients");
    }
}

impl StereoSend for ReverbModel {
    fn process_replace(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        ReverbModel::process_replace(self, input, left, right);
    }

    fn process_mix(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        ReverbModel::process_mix(self, input, left, right);
    }

    fn reset(&mut self) {
        ReverbModel::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineCount, RoomsizeResponse};

    #[test]
    fn default_parameters() {
        let reverb = ReverbModel::new(44100.0).unwrap();
        assert_eq!(reverb.params(), ReverbParams::default());
        assert_eq!(reverb.line_count(), 8);
        assert_eq!(reverb.sample_rate(), 44100.0);
    }

    #[test]
    fn rejects_invalid_sample_rate() {
        assert!(matches!(
            ReverbModel::new(0.0),
            Err(ReverbError::InvalidSampleRate(_))
        ));
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        assert!(reverb.set_sample_rate(f32::NAN).is_err());
        assert_eq!(reverb.sample_rate(), 44100.0);
    }

    #[test]
    fn lowest_sample_rate_keeps_coefficients_finite() {
        assert!(ReverbModel::new(7999.0).is_err());

        let mut reverb = ReverbModel::new(8000.0).unwrap();
        for damping in [0.0, 0.5, 1.0] {
            reverb.set_parameters(
                &ReverbParams {
                    roomsize: 0.0,
                    damping,
                    ..ReverbParams::default()
                },
                ParamMask::ALL,
            );
            let c = reverb.coefficients();
            assert!(c.decay_time > 0.0 && c.alpha.is_finite());
            for line in &c.lines {
                assert!(line.gain > 0.0 && line.gain < 1.0, "gain {}", line.gain);
                assert!(line.b0.is_finite() && line.a1.is_finite());
            }

            let mut input = [0.0f32; 4000];
            input[0] = 1.0;
            let mut left = [0.0f32; 4000];
            let mut right = [0.0f32; 4000];
            reverb.process_replace(&input, &mut left, &mut right);
            assert!(left.iter().chain(&right).all(|s| s.is_finite()));
        }
    }

    #[test]
    fn mismatched_slices_process_the_shortest() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        let mut reference = reverb.clone();

        let input = [0.25f32; 64];
        let mut left = [7.0f32; 80];
        let mut right = [7.0f32; 48];
        reverb.process_replace(&input, &mut left, &mut right);

        let mut ref_left = [0.0f32; 48];
        let mut ref_right = [0.0f32; 48];
        reference.process_replace(&input[..48], &mut ref_left, &mut ref_right);

        assert_eq!(&left[..48], &ref_left[..]);
        assert_eq!(&right[..], &ref_right[..]);
        assert!(left[48..].iter().all(|&s| s == 7.0));
    }

    #[test]
    fn mask_limits_update() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        let update = ReverbParams {
            roomsize: 0.9,
            damping: 0.7,
            width: 3.0,
            level: 0.1,
        };
        reverb.set_parameters(&update, ParamMask::ROOMSIZE);
        let p = reverb.params();
        assert_eq!(p.roomsize, 0.9);
        assert_eq!(p.damping, 0.0);
        assert_eq!(p.width, 0.5);
        assert_eq!(p.level, 0.9);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_roomsize(5.0);
        reverb.set_damping(-2.0);
        reverb.set_width(1000.0);
        reverb.set_level(f32::NAN);
        let p = reverb.params();
        assert_eq!(p.roomsize, 1.0);
        assert_eq!(p.damping, 0.0);
        assert_eq!(p.width, ReverbParams::WIDTH_MAX);
        assert_eq!(p.level, 0.9);
    }

    #[test]
    fn no_damping_gives_flat_tone() {
        let reverb = ReverbModel::new(44100.0).unwrap();
        let c = reverb.coefficients();
        assert!((c.alpha - 1.0).abs() < 1e-6);
        assert!((c.tone_b1 - 1.0).abs() < 1e-6);
        assert!(c.tone_b2.abs() < 1e-6);
        for line in &c.lines {
            assert!(line.a1.abs() < 1e-6);
            assert!((line.b0 - line.gain).abs() < 1e-6);
        }
    }

    #[test]
    fn damping_keeps_dc_gain() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_damping(0.6);
        let c = reverb.coefficients();
        assert!(c.alpha < 1.0);
        assert!(c.tone_b1 > 1.0);
        for line in &c.lines {
            let dc = line.b0 / (1.0 + line.a1);
            assert!((dc - line.gain).abs() < 1e-5, "dc {dc} vs gain {}", line.gain);
            assert!(line.a1 < 0.0);
        }
    }

    #[test]
    fn wet_mapping() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_parameters(
            &ReverbParams {
                roomsize: 0.5,
                damping: 0.0,
                width: 1.0,
                level: 1.0,
            },
            ParamMask::ALL,
        );
        let c = reverb.coefficients();
        let wet = SCALE_WET / (1.0 + SCALE_WET_WIDTH);
        assert!((c.wet1 - wet).abs() < 1e-5);
        assert_eq!(c.wet2, 0.0);

        reverb.set_width(0.0);
        let c = reverb.coefficients();
        assert!((c.wet1 - SCALE_WET * 0.5).abs() < 1e-5);
        assert!((c.wet2 - 1.0).abs() < 1e-6);

        reverb.set_level(0.0);
        let c = reverb.coefficients();
        assert_eq!(c.wet1, 0.0);
        assert_eq!(c.wet2, 0.0);
    }

    #[test]
    fn reference_decay_times() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_roomsize(0.0);
        assert!((reverb.decay_time() - 0.7).abs() < 1e-3);
        reverb.set_roomsize(0.5);
        assert!((reverb.decay_time() - 1.40).abs() < 0.05, "{}", reverb.decay_time());
        reverb.set_roomsize(1.0);
        assert!((reverb.decay_time() - 12.5).abs() < 0.05);
    }

    #[test]
    fn linear_response_option() {
        let config = ReverbConfig::default().with_response(RoomsizeResponse::Linear);
        let mut reverb = ReverbModel::with_config(44100.0, config).unwrap();
        reverb.set_roomsize(0.5);
        assert!((reverb.decay_time() - 6.6).abs() < 1e-4);
    }

    #[test]
    fn sample_rate_change_resizes_lines() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_roomsize(0.7);
        let before = reverb.decay_time();
        reverb.set_sample_rate(96000.0).unwrap();
        let lengths = reverb.delay_lengths();
        assert_eq!(lengths[0], 1308 + 8 + 1);
        assert_eq!(reverb.params().roomsize, 0.7);
        // Tables scale with the rate, so the decay time is preserved
        assert!((reverb.decay_time() - before).abs() / before < 0.01);
    }

    #[test]
    fn twelve_lines() {
        let config = ReverbConfig::default().with_line_count(LineCount::Twelve);
        let mut reverb = ReverbModel::with_config(48000.0, config).unwrap();
        assert_eq!(reverb.line_count(), 12);
        let input = [0.5f32; 256];
        let mut left = [0.0f32; 256];
        let mut right = [0.0f32; 256];
        reverb.process_replace(&input, &mut left, &mut right);
        assert!(left.iter().chain(&right).all(|s| s.is_finite()));
    }

    #[test]
    fn stereo_send_dispatch() {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        let send: &mut dyn StereoSend = &mut reverb;
        let input = [0.0f32; 32];
        let mut left = [1.0f32; 32];
        let mut right = [1.0f32; 32];
        send.process_mix(&input, &mut left, &mut right);
        assert!(left.iter().all(|s| (s - 1.0).abs() < 1e-6));
        send.reset();
        assert_eq!(send.latency_samples(), 0);
    }
}
