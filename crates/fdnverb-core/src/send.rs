//! Mono-in, stereo-out send processing.
//!
//! A reverb in a synthesizer is usually a send effect: every voice is summed
//! into one mono bus, the effect renders a stereo return, and the host either
//! owns that return (replace) or shares the output bus with other sends (mix).
//!
//! ## Design Decisions
//!
//! - **Caller-owned buffers**: All three slices belong to the host. Nothing
//!   is allocated per block.
//!
//! - **Replace vs. mix**: Both entry points run the same per-sample engine.
//!   `process_mix` accumulates so several sends can share a bus without a
//!   scratch buffer.
//!
//! - **Object-safe**: `dyn StereoSend` works for runtime routing; generic
//!   dispatch is preferred in the audio callback.

/// Core trait for mono-to-stereo send effects.
///
/// # Example
///
/// ```rust
/// use fdnverb_core::StereoSend;
///
/// struct Spread;
///
/// impl StereoSend for Spread {
///     fn process_replace(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
///         for ((x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
///             *l = *x;
///             *r = -*x;
///         }
///     }
///
///     fn process_mix(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
///         for ((x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
///             *l += *x;
///             *r -= *x;
///         }
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut send = Spread;
/// let mut left = [1.0; 2];
/// let mut right = [1.0; 2];
/// send.process_mix(&[0.5, 0.5], &mut left, &mut right);
/// assert_eq!(left, [1.5, 1.5]);
/// assert_eq!(right, [0.5, 0.5]);
/// ```
pub trait StereoSend {
    /// Render a block, overwriting `left` and `right`.
    ///
    /// Processes `min(input.len(), left.len(), right.len())` samples.
    fn process_replace(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]);

    /// Render a block, adding into `left` and `right`.
    ///
    /// Processes `min(input.len(), left.len(), right.len())` samples.
    fn process_mix(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]);

    /// Clear all internal audio state without touching parameters.
    ///
    /// Called on transport stop or to cut a ringing tail.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}
