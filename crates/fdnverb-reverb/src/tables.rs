//! Fixed tuning tables and scaling constants.
//!
//! Delay lengths are mutually prime sample counts at the 44.1 kHz reference
//! rate, spread over roughly 14-27 ms so the network's echo density builds up
//! quickly without audible flutter.

/// Sample rate the delay tables are tuned for.
pub const REFERENCE_RATE: f32 = 44100.0;

/// Lowest accepted sample rate.
///
/// Below this the short roomsize decay times drive the per-line loop gains
/// to zero in `f32`.
pub const MIN_SAMPLE_RATE: f32 = 8000.0;

/// Delay lengths (samples at 44.1 kHz) for the 8-line network.
pub const DELAY_LENGTHS_8: [usize; 8] = [601, 691, 773, 839, 919, 997, 1061, 1129];

/// Delay lengths (samples at 44.1 kHz) for the 12-line network.
pub const DELAY_LENGTHS_12: [usize; 12] = [
    601, 691, 773, 839, 919, 997, 1061, 1093, 1129, 1151, 1171, 1187,
];

/// Largest supported network.
pub const MAX_LINES: usize = 12;

/// Default modulation depth in samples at the reference rate.
pub const MOD_DEPTH: usize = 4;

/// Default number of samples between modulator updates.
pub const MOD_RATE: usize = 50;

/// Default modulation frequency in Hz.
pub const MOD_FREQ: f32 = 1.0;

/// Input gain applied before tone correction.
pub const FIXED_GAIN: f32 = 0.1;

/// Output scale folded into `wet1`.
pub const SCALE_WET: f32 = 5.0;

/// Width compensation in the `wet` denominator.
pub const SCALE_WET_WIDTH: f32 = 0.2;

/// Decay time (seconds) at roomsize 0.
pub const MIN_DECAY_TIME: f32 = 0.7;

/// Decay time (seconds) at roomsize 1.
pub const MAX_DECAY_TIME: f32 = 12.5;

/// Output gain signs `(left, right)` by line index modulo 4.
///
/// Left alternates `+ − + −`, right runs `+ + − −`: lines 1 and 2 of every
/// group feed the channels in opposite polarity, decorrelating the stereo
/// pair from a single mono network.
pub const STEREO_SIGNS: [(f32, f32); 4] = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];

#[cfg(test)]
mod tests {
    use super::*;

    fn gcd(a: usize, b: usize) -> usize {
        if b == 0 { a } else { gcd(b, a % b) }
    }

    #[test]
    fn tables_are_ascending() {
        assert!(DELAY_LENGTHS_8.windows(2).all(|w| w[0] < w[1]));
        assert!(DELAY_LENGTHS_12.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(DELAY_LENGTHS_12.len(), MAX_LINES);
    }

    #[test]
    fn lengths_are_mutually_prime() {
        for table in [&DELAY_LENGTHS_8[..], &DELAY_LENGTHS_12[..]] {
            for (i, &a) in table.iter().enumerate() {
                for &b in &table[i + 1..] {
                    assert_eq!(gcd(a, b), 1, "{a} and {b} share a factor");
                }
            }
        }
    }

    #[test]
    fn stereo_signs_are_orthogonal() {
        let dot: f32 = STEREO_SIGNS.iter().map(|(l, r)| l * r).sum();
        assert_eq!(dot, 0.0);
    }
}
