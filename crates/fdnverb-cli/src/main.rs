//! fdnverb CLI - render audio through the FDN reverb from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fdnverb")]
#[command(author, version, about = "Feedback-delay-network reverb", long_about = None)]
struct Cli {
    /// Log file operations and coefficient updates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the reverb
    Process(commands::process::ProcessArgs),

    /// Render the reverb's impulse response to a WAV file
    Impulse(commands::impulse::ImpulseArgs),

    /// Show the coefficients derived from a parameter set
    Info(commands::info::InfoArgs),

    /// List factory presets or show one as TOML
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
