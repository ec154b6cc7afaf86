//! Factory preset listing.

use clap::Args;
use fdnverb_config::{factory_preset_names, get_factory_preset, resolve_preset};

#[derive(Args)]
pub struct PresetsArgs {
    /// Show this preset (factory name or file) as TOML instead of listing
    name: Option<String>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.name {
        let preset = resolve_preset(name)?;
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("Factory Presets\n");
    for id in factory_preset_names() {
        let Some(preset) = get_factory_preset(id) else {
            continue;
        };
        let p = preset.params;
        println!(
            "  {:<12} {:<12} room {:.2}  damp {:.2}  width {:.2}  level {:.2}  {} lines",
            id,
            preset.name,
            p.roomsize,
            p.damping,
            p.width,
            p.level,
            preset.config.line_count.count()
        );
        if let Some(description) = &preset.description {
            println!("  {:<12} {description}", "");
        }
    }
    Ok(())
}
