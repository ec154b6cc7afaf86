//! Owned stereo sample buffers.

/// A pair of equal-length channel buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoBuffer {
    /// Left channel.
    pub left: Vec<f32>,
    /// Right channel.
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Wrap two channels, truncating the longer one to match.
    pub fn new(mut left: Vec<f32>, mut right: Vec<f32>) -> Self {
        let len = left.len().min(right.len());
        left.truncate(len);
        right.truncate(len);
        Self { left, right }
    }

    /// `len` frames of silence.
    pub fn zeros(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Both channels carrying `mono`.
    pub fn from_mono(mono: &[f32]) -> Self {
        Self {
            left: mono.to_vec(),
            right: mono.to_vec(),
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Largest absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// Scale both channels so the peak lands at `target` (linear).
    ///
    /// Silent buffers are left alone. Returns the applied gain.
    pub fn normalize(&mut self, target: f32) -> f32 {
        let peak = self.peak();
        if peak <= 0.0 {
            return 1.0;
        }
        let gain = target / peak;
        for s in self.left.iter_mut().chain(self.right.iter_mut()) {
            *s *= gain;
        }
        gain
    }

    /// Frames as `(left, right)` pairs.
    pub fn frames(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.left.iter().copied().zip(self.right.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_truncates_to_shorter_channel() {
        let buf = StereoBuffer::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.left, vec![1.0, 2.0]);
    }

    #[test]
    fn peak_and_normalize() {
        let mut buf = StereoBuffer::new(vec![0.25, -0.5], vec![0.1, 0.2]);
        assert_eq!(buf.peak(), 0.5);
        let gain = buf.normalize(1.0);
        assert_eq!(gain, 2.0);
        assert_eq!(buf.left, vec![0.5, -1.0]);
        assert_eq!(buf.right, vec![0.2, 0.4]);
    }

    #[test]
    fn normalize_leaves_silence() {
        let mut buf = StereoBuffer::zeros(4);
        assert_eq!(buf.normalize(1.0), 1.0);
        assert!(buf.left.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn frames_pair_channels() {
        let buf = StereoBuffer::new(vec![1.0, 3.0], vec![2.0, 4.0]);
        let frames: Vec<_> = buf.frames().collect();
        assert_eq!(frames, vec![(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(StereoBuffer::from_mono(&[1.0]).right, vec![1.0]);
    }
}
