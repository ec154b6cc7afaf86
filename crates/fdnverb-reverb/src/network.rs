//! Feedback delay network: modulated lines coupled through `P − (2/N)·u·uᵀ`.
//!
//! ## Signal Flow (one sample)
//!
//! ```text
//!            ┌──────────────────────── feedback ─────────────────────────┐
//!            ↓                                                           │
//! in ─→ [Tone] ─→ (+ matrix_factor) ─→ line i ← delay_out[(i+1) mod N] ──┤
//!                        ↑                                               │
//!                  −2/N · Σ delay_out ←──────── read_damped() ───────────┘
//!                                                   │
//!                                                   └─→ ±wet1 ─→ L, R
//! ```
//!
//! `P` is the one-step cyclic permutation and `u` the all-ones vector. The
//! matrix is orthogonal, so the loop neither gains nor loses energy on its
//! own; all decay comes from the per-line damping filters. Applying it costs
//! one sum and one scaled add per line instead of an `N × N` product.

use fdnverb_core::{ModulatedDelayLine, ToneCorrector, decay_gain};

use crate::config::ReverbConfig;
use crate::error::ReverbError;
use crate::tables::{MAX_LINES, MOD_FREQ, STEREO_SIGNS};

/// Upper bound on a line's damping pole.
///
/// At full damping the longest line's pole would land on 1.0, freezing its
/// filter state into a DC offset that never decays.
const MAX_DAMPING_POLE: f32 = 0.995;

/// Delay lines, feedback matrix, tone corrector and stereo output gains.
///
/// Built by [`ReverbModel`](crate::ReverbModel); usable on its own when the
/// caller wants to drive coefficients directly.
#[derive(Debug, Clone)]
pub struct FeedbackNetwork {
    lines: Vec<ModulatedDelayLine>,
    tone: ToneCorrector,
    /// Per-line DC loop gain gi
    gains: [f32; MAX_LINES],
    /// Per-line left output gain (±wet1)
    left_gains: [f32; MAX_LINES],
    /// Per-line right output gain (±wet1)
    right_gains: [f32; MAX_LINES],
    /// Scratch for the current sample's line outputs
    delay_out: [f32; MAX_LINES],
    /// −2/N
    matrix_scale: f32,
}

impl FeedbackNetwork {
    /// Allocate every line for `config` at `sample_rate`.
    ///
    /// Line `i` gets its modulator phase at `i · 360/N` degrees so the
    /// read positions sweep out of step with each other.
    ///
    /// # Errors
    ///
    /// [`ReverbError::Allocation`] if any delay buffer cannot be reserved.
    /// Nothing is kept from a failed build.
    pub fn try_new(config: &ReverbConfig, sample_rate: f32) -> Result<Self, ReverbError> {
        let count = config.line_count.count();
        let depth = config.scaled_mod_depth(sample_rate);
        let mod_freq = if config.mod_freq.is_finite() {
            config.mod_freq.max(0.0)
        } else {
            MOD_FREQ
        };

        let mut lines = Vec::new();
        lines
            .try_reserve_exact(count)
            .map_err(|e| ReverbError::allocation(count, e))?;

        for i in 0..count {
            let length = config.delay_length(i, sample_rate);
            let mut line = ModulatedDelayLine::try_new(length, depth, config.mod_rate)
                .map_err(|e| ReverbError::allocation(length + depth + 1, e))?;
            line.set_modulation(mod_freq, sample_rate, i as f32 * 360.0 / count as f32);
            lines.push(line);
        }

        tracing::debug!(
            lines = count,
            sample_rate,
            sizes = ?lines.iter().map(ModulatedDelayLine::size).collect::<Vec<_>>(),
            "feedback network built"
        );

        Ok(Self {
            lines,
            tone: ToneCorrector::default(),
            gains: [1.0; MAX_LINES],
            left_gains: [0.0; MAX_LINES],
            right_gains: [0.0; MAX_LINES],
            delay_out: [0.0; MAX_LINES],
            matrix_scale: -2.0 / count as f32,
        })
    }

    /// Recompute every line's loop gain and damping filter.
    ///
    /// # Arguments
    ///
    /// * `t60` - Target DC decay time in seconds
    /// * `alpha2` - Squared damping ratio; 1.0 means no HF loss
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// Gains use each line's full ring size so the decay matches what the
    /// ring actually holds.
    pub fn update_decay(&mut self, t60: f32, alpha2: f32, sample_rate: f32) {
        let tilt = 1.0 - 1.0 / alpha2;
        for (line, gain) in self.lines.iter_mut().zip(self.gains.iter_mut()) {
            let gi = decay_gain(line.size() as f32, sample_rate, t60);
            let ai = (0.25 * libm::logf(gi) * tilt).clamp(0.0, MAX_DAMPING_POLE);
            line.set_damping(gi * (1.0 - ai), -ai);
            *gain = gi;
        }
    }

    /// Set the input tone corrector from the damping ratio `alpha`.
    pub fn set_tone(&mut self, alpha: f32) {
        self.tone.set_alpha(alpha);
    }

    /// Scale the fixed stereo sign pattern by `wet1`.
    pub fn set_output_gains(&mut self, wet1: f32) {
        let n = self.lines.len();
        for (i, (left, right)) in self.left_gains[..n]
            .iter_mut()
            .zip(self.right_gains[..n].iter_mut())
            .enumerate()
        {
            let (sign_l, sign_r) = STEREO_SIGNS[i % STEREO_SIGNS.len()];
            *left = sign_l * wet1;
            *right = sign_r * wet1;
        }
    }

    /// Run one sample through the network and return the `(left, right)` sums.
    ///
    /// `input` is the already scaled and biased network input.
    #[inline]
    pub fn tick(&mut self, input: f32) -> (f32, f32) {
        let n = self.lines.len();
        let outputs = &mut self.delay_out[..n];

        let mut sum = 0.0;
        for (out, line) in outputs.iter_mut().zip(self.lines.iter_mut()) {
            *out = line.read_damped();
            sum += *out;
        }

        let matrix_factor = sum * self.matrix_scale + self.tone.process(input);
        permute_fold(outputs, matrix_factor, &mut self.lines, |line, x| {
            line.push(x);
        });

        let mut left = 0.0;
        let mut right = 0.0;
        for ((out, gl), gr) in outputs
            .iter()
            .zip(&self.left_gains[..n])
            .zip(&self.right_gains[..n])
        {
            left += gl * out;
            right += gr * out;
        }
        (left, right)
    }

    /// Refill every line with the DC baseline and clear filter memories.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.tone.reset();
        self.delay_out = [0.0; MAX_LINES];
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`: a network has at least one line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The delay lines, in table order.
    pub fn lines(&self) -> &[ModulatedDelayLine] {
        &self.lines
    }

    /// Ring size of the longest line.
    pub fn longest_line(&self) -> usize {
        self.lines.iter().map(ModulatedDelayLine::size).max().unwrap_or(1)
    }

    /// Per-line DC loop gains from the last [`update_decay`](Self::update_decay).
    pub fn gains(&self) -> &[f32] {
        &self.gains[..self.lines.len()]
    }

    /// Per-line left output gains.
    pub fn left_gains(&self) -> &[f32] {
        &self.left_gains[..self.lines.len()]
    }

    /// Per-line right output gains.
    pub fn right_gains(&self) -> &[f32] {
        &self.right_gains[..self.lines.len()]
    }

    /// Input tone corrector.
    pub fn tone(&self) -> &ToneCorrector {
        &self.tone
    }
}

/// Apply the cyclic permutation and fold in a shared term.
///
/// Target `i` receives `outputs[(i + 1) mod N] + shared`; the last target
/// wraps around to `outputs[0]`.
#[inline]
pub fn permute_fold<T>(
    outputs: &[f32],
    shared: f32,
    targets: &mut [T],
    mut write: impl FnMut(&mut T, f32),
) {
    let Some((first, rest)) = outputs.split_first() else {
        return;
    };
    for (target, source) in targets.iter_mut().zip(rest.iter().chain(core::iter::once(first))) {
        write(target, source + shared);
    }
}
