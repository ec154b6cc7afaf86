//! WAV file I/O for the fdnverb reverb.
//!
//! The reverb is mono in, stereo out, so the file layer is shaped the same
//! way:
//!
//! - [`read_wav`] loads any WAV file as a mono send (channels averaged)
//! - [`write_wav_stereo`] saves a [`StereoBuffer`] return
//! - [`read_wav_info`] reads the header only
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fdnverb_io::{StereoBuffer, WavSpec, read_wav, write_wav_stereo};
//!
//! let (send, spec) = read_wav("dry.wav")?;
//! let mut wet = StereoBuffer::zeros(send.len());
//! reverb.process_replace(&send, &mut wet.left, &mut wet.right);
//! write_wav_stereo("wet.wav", &wet, WavSpec::stereo(spec.sample_rate, 24))?;
//! ```

mod buffer;
mod wav;

pub use buffer::StereoBuffer;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav_stereo};

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested bit depth cannot be written.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
