//! Shared CLI helpers used across multiple commands.

use clap::Args;
use fdnverb_config::{Preset, resolve_preset};
use fdnverb_core::linear_to_db;
use fdnverb_io::StereoBuffer;
use fdnverb_reverb::{LineCount, ReverbModel, RoomsizeResponse};
use indicatif::{ProgressBar, ProgressStyle};

/// Reverb selection shared by every rendering command.
///
/// A preset is resolved first; individual flags then override its values.
#[derive(Args, Debug, Clone, Default)]
pub struct ReverbArgs {
    /// Factory preset name or preset TOML file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Room size (0-1)
    #[arg(long)]
    pub roomsize: Option<f32>,

    /// High-frequency damping (0-1)
    #[arg(long)]
    pub damping: Option<f32>,

    /// Stereo width (0-100, 1 = natural)
    #[arg(long)]
    pub width: Option<f32>,

    /// Output level (0-1)
    #[arg(long)]
    pub level: Option<f32>,

    /// Number of delay lines (8 or 12)
    #[arg(long, value_parser = parse_line_count)]
    pub lines: Option<LineCount>,

    /// Map room size linearly to decay time
    #[arg(long)]
    pub linear: bool,
}

impl ReverbArgs {
    /// Resolve the preset and apply flag overrides.
    pub fn preset(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => resolve_preset(name).map_err(|e| {
                anyhow::anyhow!("{e}. Use 'fdnverb presets' to see available presets.")
            })?,
            None => Preset::new("Custom"),
        };

        let p = &mut preset.params;
        if let Some(v) = self.roomsize {
            p.roomsize = v;
        }
        if let Some(v) = self.damping {
            p.damping = v;
        }
        if let Some(v) = self.width {
            p.width = v;
        }
        if let Some(v) = self.level {
            p.level = v;
        }
        if let Some(lines) = self.lines {
            preset.config.line_count = lines;
        }
        if self.linear {
            preset.config.response = RoomsizeResponse::Linear;
        }

        preset.validate()?;
        Ok(preset)
    }

    /// Resolve the preset and build a reverb at `sample_rate`.
    pub fn build(&self, sample_rate: u32) -> anyhow::Result<(Preset, ReverbModel)> {
        let preset = self.preset()?;
        if let Some(hint) = preset.sample_rate
            && hint != sample_rate
        {
            tracing::warn!(
                preset = %preset.name,
                preset_rate = hint,
                sample_rate,
                "preset was tuned at a different sample rate"
            );
        }
        let reverb = preset.build(sample_rate as f32)?;
        Ok((preset, reverb))
    }
}

fn parse_line_count(s: &str) -> Result<LineCount, String> {
    let count: usize = s
        .parse()
        .map_err(|_| format!("invalid line count '{s}'"))?;
    LineCount::try_from(count)
}

/// Render `input` through `reverb` block by block into `out`.
///
/// With `mix` set the reverb is added onto whatever `out` already holds.
pub fn render(
    reverb: &mut ReverbModel,
    input: &[f32],
    out: &mut StereoBuffer,
    block_size: usize,
    mix: bool,
    progress: &ProgressBar,
) {
    let block_size = block_size.max(1);
    for ((x, l), r) in input
        .chunks(block_size)
        .zip(out.left.chunks_mut(block_size))
        .zip(out.right.chunks_mut(block_size))
    {
        if mix {
            reverb.process_mix(x, l, r);
        } else {
            reverb.process_replace(x, l, r);
        }
        progress.inc(x.len() as u64);
    }
    progress.finish_and_clear();
}

/// Progress bar over `len` samples, hidden when `quiet`.
pub fn progress_bar(len: usize, quiet: bool) -> anyhow::Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// RMS level in dB.
pub fn rms_db(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return linear_to_db(0.0);
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    linear_to_db((sum / samples.len() as f32).sqrt())
}

/// Peak level in dB.
pub fn peak_db(samples: &[f32]) -> f32 {
    linear_to_db(samples.iter().fold(0.0f32, |m, s| m.max(s.abs())))
}
