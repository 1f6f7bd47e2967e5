//! lumensync CLI - command-line embedder for the audio-to-light pipeline.

mod commands;
mod pipeline;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lumensync")]
#[command(author, version, about = "Audio-to-light pipeline CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover lighting devices on the network
    Devices(commands::devices::DevicesArgs),

    /// List, show, and validate presets
    Presets(commands::presets::PresetsArgs),

    /// Run the pipeline against a preset and a set of devices
    Run(commands::run::RunArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    tracing::debug!(command = ?std::mem::discriminant(&cli.command), "dispatching command");

    match cli.command {
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Run(args) => commands::run::run(args),
    }
}
