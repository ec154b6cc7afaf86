//! Impulse response rendering command.

use super::common::{ReverbArgs, progress_bar, render};
use clap::Args;
use fdnverb_io::{StereoBuffer, WavSpec, write_wav_stereo};
use std::path::PathBuf;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output stereo WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    reverb: ReverbArgs,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Length in seconds (defaults to 1.2x the decay time)
    #[arg(long)]
    seconds: Option<f32>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Scale the response so its peak sits at 0 dBFS
    #[arg(long)]
    normalize: bool,

    /// Suppress the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    let (preset, mut reverb) = args.reverb.build(args.sample_rate)?;

    let seconds = args.seconds.unwrap_or(reverb.decay_time() * 1.2 + 0.1);
    anyhow::ensure!(
        seconds.is_finite() && seconds > 0.0,
        "length must be a positive number of seconds"
    );
    let len = (seconds * args.sample_rate as f32) as usize;

    let mut input = vec![0.0f32; len.max(1)];
    input[0] = 1.0;
    let mut output = StereoBuffer::zeros(input.len());

    let pb = progress_bar(input.len(), args.quiet)?;
    render(&mut reverb, &input, &mut output, 1024, false, &pb);

    if args.normalize {
        let gain = output.normalize(1.0);
        tracing::info!(gain, "normalized impulse response");
    }

    tracing::info!(path = %args.output.display(), frames = output.len(), "writing impulse response");
    write_wav_stereo(
        &args.output,
        &output,
        WavSpec::stereo(args.sample_rate, args.bit_depth),
    )?;

    if !args.quiet {
        println!(
            "{}: {} ({:.2}s decay, {:.2}s rendered)",
            args.output.display(),
            preset.name,
            reverb.decay_time(),
            seconds
        );
    }
    Ok(())
}
