//! Display the coefficients a parameter set produces.

use super::common::ReverbArgs;
use clap::Args;
use fdnverb_reverb::RoomsizeResponse;

/// Show derived reverb coefficients.
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    reverb: ReverbArgs,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let (preset, reverb) = args.reverb.build(args.sample_rate)?;
    let coefficients = reverb.coefficients();

    if args.json {
        let report = serde_json::json!({
            "preset": preset.name,
            "sample_rate": args.sample_rate,
            "params": reverb.params(),
            "config": reverb.config(),
            "coefficients": coefficients,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let p = reverb.params();
    let response = match reverb.config().response {
        RoomsizeResponse::Concave => "concave",
        RoomsizeResponse::Linear => "linear",
    };

    println!("Preset:      {}", preset.name);
    println!("Sample Rate: {} Hz", args.sample_rate);
    println!("Lines:       {} ({response} roomsize)", reverb.line_count());
    println!(
        "Params:      roomsize {:.3}, damping {:.3}, width {:.3}, level {:.3}",
        p.roomsize, p.damping, p.width, p.level
    );
    println!("Decay:       {:.3}s", coefficients.decay_time);
    println!(
        "Tone:        alpha {:.5}, b1 {:.5}, b2 {:.5}",
        coefficients.alpha, coefficients.tone_b1, coefficients.tone_b2
    );
    println!(
        "Wet:         wet1 {:.5}, wet2/wet1 {:.5}",
        coefficients.wet1, coefficients.wet2
    );
    println!();
    println!(
        "  {:>4}  {:>6}  {:>8}  {:>9}  {:>9}  {:>9}",
        "line", "size", "ms", "gain", "b0", "a1"
    );
    for (i, line) in coefficients.lines.iter().enumerate() {
        println!(
            "  {:>4}  {:>6}  {:>8.2}  {:>9.6}  {:>9.6}  {:>9.6}",
            i,
            line.size,
            line.size as f32 * 1000.0 / args.sample_rate as f32,
            line.gain,
            line.b0,
            line.a1
        );
    }

    Ok(())
}
