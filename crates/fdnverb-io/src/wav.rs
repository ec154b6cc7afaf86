//! WAV file reading and writing.

use crate::{Error, Result, StereoBuffer};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Samples per channel.
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
        format: match spec.sample_format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        },
    })
}

/// WAV file specification.
///
/// 32-bit files are written as float, 16 and 24-bit as integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Two-channel spec at `sample_rate`.
    pub fn stereo(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample,
        }
    }

    fn to_hound(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            32 => SampleFormat::Float,
            16 | 24 => SampleFormat::Int,
            other => return Err(Error::UnsupportedBitDepth(other)),
        };
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::stereo(48000, 32)
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

/// Read a WAV file as a mono send, averaging all channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = pcm_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        interleaved
    };

    tracing::debug!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        frames = mono.len(),
        "read wav"
    );
    Ok((mono, spec))
}

/// Write a stereo buffer, forcing `spec.channels` to 2.
///
/// Integer formats clip to full scale.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoBuffer,
    spec: WavSpec,
) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 2,
        ..spec
    };
    let hound_spec = spec.to_hound()?;
    let mut writer = WavWriter::create(path, hound_spec)?;

    match hound_spec.sample_format {
        SampleFormat::Float => {
            for (l, r) in samples.frames() {
                writer.write_sample(l)?;
                writer.write_sample(r)?;
            }
        }
        SampleFormat::Int => {
            let scale = pcm_scale(spec.bits_per_sample);
            for (l, r) in samples.frames() {
                writer.write_sample(to_pcm(l, scale))?;
                writer.write_sample(to_pcm(r, scale))?;
            }
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "wrote wav"
    );
    Ok(())
}

fn pcm_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

fn to_pcm(sample: f32, scale: f32) -> i32 {
    (sample * scale).clamp(-scale, scale - 1.0) as i32
}
