//! Property-based tests for the reverb model.
//!
//! Randomized parameters must always give a stable loop, reproducible
//! coefficients and finite output.

use fdnverb_reverb::{
    LineCount, ParamMask, ReverbConfig, ReverbModel, ReverbParams, RoomsizeResponse,
};
use proptest::prelude::*;

fn line_count() -> impl Strategy<Value = LineCount> {
    prop_oneof![Just(LineCount::Eight), Just(LineCount::Twelve)]
}

fn response() -> impl Strategy<Value = RoomsizeResponse> {
    prop_oneof![Just(RoomsizeResponse::Concave), Just(RoomsizeResponse::Linear)]
}

fn sample_rate() -> impl Strategy<Value = f32> {
    prop_oneof![
        Just(8000.0f32),
        Just(22050.0),
        Just(44100.0),
        Just(48000.0),
        Just(96000.0)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every per-line loop gain stays strictly inside (0, 1) and every
    /// damping pole stays inside the unit circle.
    #[test]
    fn loop_gains_are_stable(
        roomsize in 0.0f32..=1.0,
        damping in 0.0f32..=1.0,
        lines in line_count(),
        response in response(),
        sr in sample_rate(),
    ) {
        let config = ReverbConfig::default().with_line_count(lines).with_response(response);
        let mut reverb = ReverbModel::with_config(sr, config).unwrap();
        reverb.set_parameters(
            &ReverbParams { roomsize, damping, ..ReverbParams::default() },
            ParamMask::ROOMSIZE | ParamMask::DAMPING,
        );

        let c = reverb.coefficients();
        prop_assert_eq!(c.lines.len(), lines.count());
        for line in &c.lines {
            prop_assert!(line.gain > 0.0 && line.gain < 1.0, "gain {}", line.gain);
            prop_assert!(line.a1 <= 0.0 && line.a1 > -1.0, "a1 {}", line.a1);
            prop_assert!(line.b0 > 0.0, "b0 {}", line.b0);
        }
        prop_assert!(c.alpha > 0.0 && c.alpha <= 1.0, "alpha {}", c.alpha);
    }

    /// Applying the same parameters twice yields bit-identical coefficients.
    #[test]
    fn coefficients_are_idempotent(
        roomsize in -0.5f32..=1.5,
        damping in -0.5f32..=1.5,
        width in -10.0f32..=150.0,
        level in -0.5f32..=1.5,
    ) {
        let p = ReverbParams { roomsize, damping, width, level };
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_parameters(&p, ParamMask::ALL);
        let first = reverb.coefficients();
        reverb.set_parameters(&p, ParamMask::ALL);
        prop_assert_eq!(reverb.coefficients(), first);
    }

    /// Arbitrary parameters and bounded input never produce NaN or runaway output.
    #[test]
    fn output_is_finite(
        roomsize in 0.0f32..=1.0,
        damping in 0.0f32..=1.0,
        width in 0.0f32..=100.0,
        level in 0.0f32..=1.0,
        input in prop::collection::vec(-1.0f32..=1.0, 64..512),
    ) {
        let mut reverb = ReverbModel::new(48000.0).unwrap();
        reverb.set_parameters(&ReverbParams { roomsize, damping, width, level }, ParamMask::ALL);

        let mut left = vec![0.0; input.len()];
        let mut right = vec![0.0; input.len()];
        for _ in 0..8 {
            reverb.process_replace(&input, &mut left, &mut right);
            for (l, r) in left.iter().zip(&right) {
                prop_assert!(l.is_finite() && r.is_finite());
                prop_assert!(l.abs() < 1000.0 && r.abs() < 1000.0, "runaway {} / {}", l, r);
            }
        }
    }

    /// Clamped parameters always land inside their ranges.
    #[test]
    fn parameters_are_clamped(
        roomsize in prop::num::f32::ANY,
        damping in prop::num::f32::ANY,
        width in prop::num::f32::ANY,
        level in prop::num::f32::ANY,
    ) {
        let mut reverb = ReverbModel::new(44100.0).unwrap();
        reverb.set_parameters(&ReverbParams { roomsize, damping, width, level }, ParamMask::ALL);
        let p = reverb.params();
        prop_assert!((0.0..=1.0).contains(&p.roomsize));
        prop_assert!((0.0..=1.0).contains(&p.damping));
        prop_assert!((0.0..=ReverbParams::WIDTH_MAX).contains(&p.width));
        prop_assert!((0.0..=1.0).contains(&p.level));
        prop_assert!(reverb.decay_time().is_finite());
    }
}
