//! File-based reverb processing command.

use super::common::{ReverbArgs, peak_db, progress_bar, render, rms_db};
use clap::Args;
use fdnverb_io::{StereoBuffer, WavSpec, read_wav, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mixed down to mono)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output stereo WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    reverb: ReverbArgs,

    /// Dry signal level mixed under the reverb (0 = reverb only)
    #[arg(long, default_value = "0.0")]
    dry: f32,

    /// Seconds of tail rendered after the input ends
    #[arg(long, default_value = "2.0")]
    tail: f32,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Suppress the progress bar and statistics
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be at least 1");
    anyhow::ensure!(
        args.tail.is_finite() && args.tail >= 0.0,
        "tail must be a non-negative number of seconds"
    );
    anyhow::ensure!(
        args.dry.is_finite() && args.dry >= 0.0,
        "dry level must be non-negative"
    );

    tracing::info!(path = %args.input.display(), "reading input");
    let (mut samples, spec) = read_wav(&args.input)?;
    let input_len = samples.len();

    let (preset, mut reverb) = args.reverb.build(spec.sample_rate)?;
    tracing::info!(
        preset = %preset.name,
        decay_time = reverb.decay_time(),
        lines = reverb.line_count(),
        "reverb ready"
    );

    let tail = (args.tail * spec.sample_rate as f32) as usize;
    samples.resize(input_len + tail, 0.0);

    let mut output = if args.dry > 0.0 {
        let dry: Vec<f32> = samples.iter().map(|x| x * args.dry).collect();
        StereoBuffer::from_mono(&dry)
    } else {
        StereoBuffer::zeros(samples.len())
    };

    let pb = progress_bar(samples.len(), args.quiet)?;
    render(
        &mut reverb,
        &samples,
        &mut output,
        args.block_size,
        args.dry > 0.0,
        &pb,
    );

    if !args.quiet {
        println!(
            "{} -> {} ({}, {:.2}s decay, {} Hz)",
            args.input.display(),
            args.output.display(),
            preset.name,
            reverb.decay_time(),
            spec.sample_rate
        );
        println!(
            "  Input:  RMS {:.1} dB, Peak {:.1} dB",
            rms_db(&samples[..input_len]),
            peak_db(&samples[..input_len])
        );
        println!(
            "  Left:   RMS {:.1} dB, Peak {:.1} dB",
            rms_db(&output.left),
            peak_db(&output.left)
        );
        println!(
            "  Right:  RMS {:.1} dB, Peak {:.1} dB",
            rms_db(&output.right),
            peak_db(&output.right)
        );
    }

    if output.peak() > 1.0 && args.bit_depth != 32 {
        tracing::warn!(
            peak_db = peak_db(&output.left).max(peak_db(&output.right)),
            "output exceeds full scale and will clip"
        );
    }

    tracing::info!(path = %args.output.display(), "writing output");
    write_wav_stereo(
        &args.output,
        &output,
        WavSpec::stereo(spec.sample_rate, args.bit_depth),
    )?;
    Ok(())
}
